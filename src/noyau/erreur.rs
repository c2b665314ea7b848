// src/noyau/erreur.rs
//
// Erreurs typées du noyau.
// Toutes sont récupérées au niveau de eval_expression : aucune ne fait paniquer le programme.
// Les messages (Display) sont ceux affichés après "Error: ".

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// Morceau d’entrée qui n’est ni nombre, ni opérateur, ni fonction, ni parenthèse.
    #[error("Invalid input: {0}")]
    InvalidToken(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Square root of negative number")]
    NegativeSquareRoot,

    /// base ≤ 0, base == 1 ou valeur ≤ 0
    #[error("Invalid logarithm")]
    InvalidLogarithm,

    #[error("Invalid natural logarithm")]
    InvalidNaturalLog,

    #[error("Malformed expression: {0}")]
    MalformedExpression(Malformation),

    /// Débordement (±∞ ou NaN) : pas d’affichage à virgule fixe possible.
    #[error("Result out of range")]
    NonFinite,
}

/// Détail d’une expression mal formée (parenthèses, nombre d’opérandes, arguments).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("empty expression")]
    Vide,

    #[error("missing operand")]
    OperandeManquant,

    #[error("too many operands")]
    OperandesEnTrop,

    #[error("unclosed parenthesis")]
    ParentheseNonFermee,

    #[error("unexpected closing parenthesis")]
    ParentheseNonOuverte,

    #[error("function without parentheses")]
    FonctionSansParenthese,

    #[error("separator outside parentheses")]
    VirguleHorsParentheses,

    #[error("expected {attendus} argument(s), found {trouves}")]
    MauvaisNombreArguments { attendus: usize, trouves: usize },
}

impl From<Malformation> for EvalError {
    fn from(m: Malformation) -> Self {
        EvalError::MalformedExpression(m)
    }
}
