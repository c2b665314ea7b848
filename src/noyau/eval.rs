//! Noyau — évaluation (pipeline réel)
//!
//! texte -> jetons -> deux piles -> f64 -> affichage décimal
//!
//! Fonction pure : aucune donnée ne survit d’un appel à l’autre.

use tracing::{debug, trace};

use super::erreur::EvalError;
use super::evaluateur::evaluate_atoms;
use super::format::format_decimal;
use super::jetons::{format_atomes, tokenize};

/// Évalue une expression en valeur numérique finie.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let atomes = tokenize(expr)?;
    trace!(atomes = %format_atomes(&atomes), "jetons");

    let x = evaluate_atoms(&atomes)?;
    if !x.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(x)
}

/// API publique pour l’affichage :
/// - `Ok(texte)` : nombre formaté (au plus `digits` décimales)
/// - `Err(texte)` : `"Error: "` + message lisible
pub fn eval_expression(expr: &str, digits: usize) -> Result<String, String> {
    let res = evaluate(expr).and_then(|x| format_decimal(x, digits));

    match &res {
        Ok(s) => debug!(expr, resultat = %s, "évaluation"),
        Err(e) => debug!(expr, erreur = %e, "évaluation refusée"),
    }

    res.map_err(|e| format!("Error: {e}"))
}
