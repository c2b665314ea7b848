// src/noyau/format.rs
//
// Affichage décimal à virgule fixe d’un f64.
// - au plus `digits` décimales, arrondi au plus proche (égalité -> chiffre pair)
// - zéros finaux retirés, pas de notation scientifique, pas de séparateur de milliers
// - jamais de "-0"
//
// On lit la valeur binaire EXACTE du f64 (rationnel n/2^k) : l’arrondi ne dépend
// pas d’une première conversion texte intermédiaire.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::erreur::EvalError;

/// Nombre de décimales par défaut (motif "#.##########").
pub const DIGITS_DEFAUT: usize = 10;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// |r| × 10^digits arrondi à l’entier le plus proche, égalité vers le pair.
fn scaled_half_even(r: &BigRational, digits: usize) -> BigInt {
    let num = r.numer().abs() * pow10(digits);
    let den = r.denom().abs();

    let q = &num / &den;
    let reste = &num % &den;

    let double = reste * 2u32;
    let monte = match double.cmp(&den) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => (&q % 2u32) == BigInt::from(1),
    };

    if monte {
        q + 1u32
    } else {
        q
    }
}

/// Entier “scalé” (×10^digits, positif) -> texte, zéros finaux retirés.
fn scaled_to_decimal(scaled: &BigInt, digits: usize, negatif: bool) -> String {
    let scale = pow10(digits);
    let int_part = scaled / &scale;
    let frac_part = scaled % &scale;

    let mut out = String::new();
    if negatif && !scaled.is_zero() {
        out.push('-');
    }
    out.push_str(&int_part.to_str_radix(10));

    if digits > 0 && !frac_part.is_zero() {
        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < digits {
            frac.insert(0, '0');
        }
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    out
}

/// Formate `x` avec au plus `digits` décimales.
pub fn format_decimal(x: f64, digits: usize) -> Result<String, EvalError> {
    let r = BigRational::from_float(x).ok_or(EvalError::NonFinite)?;
    let scaled = scaled_half_even(&r, digits);
    Ok(scaled_to_decimal(&scaled, digits, r.is_negative()))
}
