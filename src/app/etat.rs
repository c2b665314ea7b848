//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir le tampon d’entrée affiché et le reconstruire à chaque touche,
//! exactement comme le pavé le demande :
//! - chiffre / point       : ajout en fin
//! - opérateur             : ajout de " op "
//! - virgule               : ajout de ", " (arguments de log)
//! - fonction              : enveloppe tout le tampon, "nom(tampon)"
//! - Backspace / Clear     : retire un caractère / vide
//!
//! L’évaluation ("=") passe par vue.rs, qui dépose ensuite le résultat ici.

use tracing::trace;

use crate::noyau::DIGITS_DEFAUT;

/// Garde-fou : au-delà, un f64 ne porte plus de décimales significatives.
pub const DIGITS_MAX: usize = 15;

/// Une touche du pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(char),
    Point,
    Operateur(char),
    Virgule,
    Fonction(&'static str),
    Backspace,
    Clear,
    Egal,
}

impl Touche {
    /// Étiquette du pavé -> touche (None si inconnue).
    pub fn depuis_etiquette(etiquette: &str) -> Option<Touche> {
        let t = match etiquette {
            "." => Touche::Point,
            "," => Touche::Virgule,
            "+" => Touche::Operateur('+'),
            "-" => Touche::Operateur('-'),
            "*" => Touche::Operateur('*'),
            "/" => Touche::Operateur('/'),
            "sqrt" => Touche::Fonction("sqrt"),
            "x^2" => Touche::Fonction("x^2"),
            "sin" => Touche::Fonction("sin"),
            "cos" => Touche::Fonction("cos"),
            "tan" => Touche::Fonction("tan"),
            "log" => Touche::Fonction("log"),
            "ln" => Touche::Fonction("ln"),
            "Backspace" => Touche::Backspace,
            "Clear" => Touche::Clear,
            "=" => Touche::Egal,
            _ => {
                let mut chars = etiquette.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Touche::Chiffre(c),
                    _ => return None,
                }
            }
        };
        Some(t)
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- tampon affiché (entrée en cours, résultat ou message d’erreur) ---
    pub entree: String,

    // vrai si `entree` contient un message "Error: ..." : la touche suivante repart de zéro
    pub erreur_affichee: bool,

    // --- paramètres ---
    pub digits: usize, // décimales affichées
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            erreur_affichee: false,
            digits: DIGITS_DEFAUT,
        }
    }
}

impl AppCalc {
    /* ------------------------ Édition du tampon ------------------------ */

    /// Applique une touche d’édition. `Egal` est ignoré ici (voir vue.rs).
    pub fn edite(&mut self, touche: Touche) {
        trace!(?touche, entree = %self.entree, "touche");

        if self.erreur_affichee && touche != Touche::Egal {
            self.clear_entree();
        }

        match touche {
            Touche::Chiffre(c) => self.entree.push(c),
            Touche::Point => self.entree.push('.'),
            Touche::Operateur(op) => {
                self.entree.push(' ');
                self.entree.push(op);
                self.entree.push(' ');
            }
            Touche::Virgule => self.entree.push_str(", "),
            Touche::Fonction(nom) => self.entree = format!("{nom}({})", self.entree),
            Touche::Backspace => {
                self.entree.pop();
            }
            Touche::Clear => self.clear_entree(),
            Touche::Egal => {}
        }
    }

    /// Clear : vide le tampon.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.erreur_affichee = false;
    }

    /// Dépose le résultat de "=" : le nombre reste éditable, l’erreur sera effacée
    /// à la prochaine touche.
    pub fn set_resultat(&mut self, resultat: Result<String, String>) {
        match resultat {
            Ok(s) => {
                self.entree = s;
                self.erreur_affichee = false;
            }
            Err(msg) => {
                self.entree = msg;
                self.erreur_affichee = true;
            }
        }
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
    }
}
