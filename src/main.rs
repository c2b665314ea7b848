// src/main.rs
//
// Calculatrice scientifique — point d’entrée natif
// ------------------------------------------------
// - Journal (tracing) installé avant la fenêtre
// - eframe::run_native + NativeOptions

use eframe::egui;
use tracing::*;

mod app;
mod noyau;

use app::AppCalc;

/// Titre unique (fenêtre + journal).
const TITRE_APP: &str = "Calculatrice scientifique";

/// Variable d’environnement : directives de filtre du journal (ex: "calculatrice_sci=trace").
const VAR_JOURNAL: &str = "CALCULATRICE_LOG";

fn main() -> eframe::Result<()> {
    init_logging();
    info!("{TITRE_APP} : démarrage");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([500.0, 460.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}

/* ------------------------ Journal ------------------------ */

fn init_logging() {
    use tracing_subscriber::{
        filter::{LevelFilter, Targets},
        fmt::Layer,
        prelude::*,
    };

    // Par défaut : INFO partout, DEBUG pour la calculatrice.
    let defaut = Targets::new()
        .with_default(LevelFilter::INFO)
        .with_target(env!("CARGO_CRATE_NAME"), LevelFilter::DEBUG);

    let (filtre, directive_invalide) = match std::env::var(VAR_JOURNAL) {
        Ok(s) => match s.parse::<Targets>() {
            Ok(t) => (t, None),
            Err(e) => (defaut, Some(format!("{s:?} ({e})"))),
        },
        Err(_) => (defaut, None),
    };

    tracing_subscriber::registry()
        .with(
            Layer::new()
                .pretty()
                .with_ansi(true)
                .with_writer(std::io::stdout)
                .with_filter(filtre),
        )
        .init();

    if let Some(d) = directive_invalide {
        warn!("{VAR_JOURNAL} ignorée, directive invalide : {d}");
    }
}
