// src/app/vue.rs
//
// Vue (UI egui) — natif
// ---------------------
// - Affichage lecture seule du tampon (entrée, résultat ou erreur)
// - Pavé : même disposition que la calculatrice d’origine, plus "," pour log(base, valeur)
// - "=" : seul point de contact avec le noyau

use eframe::egui;
use tracing::debug;

use super::etat::{AppCalc, Touche, DIGITS_MAX};

/// Disposition du pavé, rangée par rangée.
const PAVE: &[&[&str]] = &[
    &["7", "8", "9", "/", "sqrt"],
    &["4", "5", "6", "*", "x^2"],
    &["1", "2", "3", "-", "Backspace"],
    &["0", ".", "+", "=", ","],
    &["sin", "cos", "tan", "log", "ln"],
    &["Clear"],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_affichage(ui);

        ui.add_space(8.0);
        self.ui_pave(ui);

        ui.add_space(8.0);
        ui.separator();
        self.ui_reglages(ui);
    }

    /// Applique une touche ; "=" évalue via le noyau.
    pub fn appuie(&mut self, touche: Touche) {
        match touche {
            Touche::Egal => self.eval_via_noyau(),
            autre => self.edite(autre),
        }
    }

    fn ui_affichage(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                let texte = egui::RichText::new(&self.entree).monospace().size(20.0);
                if self.erreur_affichee {
                    ui.colored_label(ui.visuals().error_fg_color, texte);
                } else {
                    ui.label(texte);
                }
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for &etiquette in rangee.iter() {
                        let resp = ui.add_sized([88.0, 44.0], egui::Button::new(etiquette));
                        if resp.clicked() {
                            if let Some(t) = Touche::depuis_etiquette(etiquette) {
                                self.appuie(t);
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Décimales :");
            let mut d = self.digits as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=DIGITS_MAX as u32),
            );
            if resp.changed() {
                self.set_digits(d as usize);
            }
        });
    }

    /// Évalue le tampon via le noyau puis remplace l’affichage par le résultat (ou l’erreur).
    fn eval_via_noyau(&mut self) {
        let res = crate::noyau::eval_expression(&self.entree, self.digits);
        debug!(entree = %self.entree, ?res, "=");
        self.set_resultat(res);
    }
}
