// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// - Déclare les sous-modules (etat.rs + vue.rs)
// - Ré-exporte AppCalc (pour main.rs)
// - Fournit l’impl eframe::App + raccourcis clavier globaux

pub mod etat;
pub mod vue;

pub use etat::{AppCalc, Touche};

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Clavier : mêmes effets que les touches du pavé.
        // Enter = "=", Escape = Clear, Backspace = Backspace
        let (enter, esc, backspace) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Backspace),
            )
        });

        if enter {
            self.appuie(Touche::Egal);
        }
        if esc {
            self.appuie(Touche::Clear);
        }
        if backspace {
            self.appuie(Touche::Backspace);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
