//! Noyau de la calculatrice scientifique (f64)
//!
//! Organisation interne :
//! - erreur.rs      : erreurs typées (EvalError, Malformation)
//! - jetons.rs      : tokenisation (Atom)
//! - evaluateur.rs  : shunting-yard à deux piles + table des fonctions
//! - format.rs      : affichage décimal à virgule fixe
//! - eval.rs        : pipeline complet

pub mod erreur;
pub mod eval;
pub mod evaluateur;
pub mod format;
pub mod jetons;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use format::DIGITS_DEFAUT;
