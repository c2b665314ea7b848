// src/noyau/evaluateur.rs
//
// Shunting-yard à deux piles (opérandes f64 + opérateurs en attente).
// Évalue directement, sans construire d’arbre ni de RPN intermédiaire.
//
// Règles:
// - Num                 : empile la valeur
// - Op                  : dépile/applique tant que le sommet est un Op de précédence >= (associativité gauche)
// - LPar / fonction     : empilés tels quels ; une fonction doit être suivie de '('
// - Virgule             : dépile jusqu’à '(' (séparateur d’arguments de log)
// - RPar                : dépile jusqu’à '(' puis applique la fonction éventuelle au sommet
// - fin                 : dépile tout ; il doit rester exactement une valeur
//
// Toute erreur est terminale pour l’évaluation en cours (pas de résultat partiel).

use super::erreur::{EvalError, Malformation};
use super::jetons::{Atom, Op, Unaire};

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum EnAttente {
    Op(Op),
    /// `base` : hauteur de la pile d’opérandes à l’ouverture.
    /// `virgules` : séparateurs déjà vus dans ce groupe.
    Paren {
        base: usize,
        virgules: usize,
    },
    Unaire(Unaire),
    Log,
}

/// Évalue une suite d’atomes (une seule passe, gauche à droite).
pub fn evaluate_atoms(atomes: &[Atom]) -> Result<f64, EvalError> {
    let mut valeurs: Vec<f64> = Vec::new();
    let mut ops: Vec<EnAttente> = Vec::new();

    // vrai juste après un nom de fonction : seul '(' est accepté ensuite
    let mut attend_parenthese = false;

    for &atom in atomes {
        if attend_parenthese && atom != Atom::LPar {
            return Err(Malformation::FonctionSansParenthese.into());
        }
        attend_parenthese = false;

        match atom {
            Atom::Num(x) => valeurs.push(x),

            Atom::Op(op) => {
                while let Some(&EnAttente::Op(top)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    ops.pop();
                    applique_binaire(&mut valeurs, top)?;
                }
                ops.push(EnAttente::Op(op));
            }

            Atom::Unaire(f) => {
                ops.push(EnAttente::Unaire(f));
                attend_parenthese = true;
            }

            Atom::Log => {
                ops.push(EnAttente::Log);
                attend_parenthese = true;
            }

            Atom::LPar => ops.push(EnAttente::Paren {
                base: valeurs.len(),
                virgules: 0,
            }),

            Atom::Virgule => {
                if !depile_jusqu_a_parenthese(&mut valeurs, &mut ops)? {
                    return Err(Malformation::VirguleHorsParentheses.into());
                }
                if let Some(EnAttente::Paren { base, virgules }) = ops.last_mut() {
                    // chaque argument doit produire exactement une valeur
                    compte_valeurs(valeurs.len(), *base, *virgules + 1)?;
                    *virgules += 1;
                }
            }

            Atom::RPar => ferme_groupe(&mut valeurs, &mut ops)?,
        }
    }

    if attend_parenthese {
        return Err(Malformation::FonctionSansParenthese.into());
    }

    // vide la pile d’opérateurs
    while let Some(p) = ops.pop() {
        match p {
            EnAttente::Op(op) => applique_binaire(&mut valeurs, op)?,
            EnAttente::Paren { .. } => return Err(Malformation::ParentheseNonFermee.into()),
            EnAttente::Unaire(_) | EnAttente::Log => {
                return Err(Malformation::FonctionSansParenthese.into())
            }
        }
    }

    match valeurs.as_slice() {
        [] => Err(Malformation::Vide.into()),
        [x] => Ok(*x),
        _ => Err(Malformation::OperandesEnTrop.into()),
    }
}

/// Dépile/applique les opérateurs binaires jusqu’à la '(' la plus proche (laissée en place).
/// Retourne false si aucune '(' n’est ouverte.
fn depile_jusqu_a_parenthese(
    valeurs: &mut Vec<f64>,
    ops: &mut Vec<EnAttente>,
) -> Result<bool, EvalError> {
    loop {
        match ops.last().copied() {
            Some(EnAttente::Paren { .. }) => return Ok(true),
            Some(EnAttente::Op(op)) => {
                ops.pop();
                applique_binaire(valeurs, op)?;
            }
            // une fonction est toujours sous sa propre '(' : pas de '(' ouverte ici
            Some(EnAttente::Unaire(_)) | Some(EnAttente::Log) | None => return Ok(false),
        }
    }
}

/// Traite ')' : résout le groupe, puis la fonction qui le précède s’il y en a une.
fn ferme_groupe(valeurs: &mut Vec<f64>, ops: &mut Vec<EnAttente>) -> Result<(), EvalError> {
    if !depile_jusqu_a_parenthese(valeurs, ops)? {
        return Err(Malformation::ParentheseNonOuverte.into());
    }

    let Some(EnAttente::Paren { base, virgules }) = ops.pop() else {
        return Err(Malformation::ParentheseNonOuverte.into());
    };

    let produites = compte_valeurs(valeurs.len(), base, virgules + 1)?;

    match ops.last().copied() {
        Some(EnAttente::Unaire(f)) => {
            verifie_arguments(1, produites)?;
            ops.pop();
            let a = depile(valeurs)?;
            valeurs.push(applique_unaire(f, a)?);
        }
        Some(EnAttente::Log) => {
            verifie_arguments(2, produites)?;
            ops.pop();
            // la valeur a été empilée après la base
            let valeur = depile(valeurs)?;
            let base = depile(valeurs)?;
            valeurs.push(logarithme(base, valeur)?);
        }
        _ => verifie_arguments(1, produites)?,
    }

    Ok(())
}

/// Valeurs produites depuis `base` ; il en faut exactement `attendues`.
/// Moins que `base` : un opérateur du groupe a consommé une valeur d’avant la '('.
fn compte_valeurs(hauteur: usize, base: usize, attendues: usize) -> Result<usize, EvalError> {
    let produites = hauteur.saturating_sub(base);
    if hauteur < base + attendues {
        return Err(Malformation::OperandeManquant.into());
    }
    if produites > attendues {
        return Err(Malformation::OperandesEnTrop.into());
    }
    Ok(produites)
}

fn verifie_arguments(attendus: usize, trouves: usize) -> Result<(), EvalError> {
    if attendus == trouves {
        Ok(())
    } else {
        Err(Malformation::MauvaisNombreArguments { attendus, trouves }.into())
    }
}

fn depile(valeurs: &mut Vec<f64>) -> Result<f64, EvalError> {
    valeurs
        .pop()
        .ok_or(EvalError::MalformedExpression(Malformation::OperandeManquant))
}

/// Pop-and-apply : b (opérande de droite) sort en premier, puis a.
fn applique_binaire(valeurs: &mut Vec<f64>, op: Op) -> Result<(), EvalError> {
    let b = depile(valeurs)?;
    let a = depile(valeurs)?;

    let r = match op {
        Op::Plus => a + b,
        Op::Minus => a - b,
        Op::Star => a * b,
        Op::Slash => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };

    valeurs.push(r);
    Ok(())
}

/// Fonctions à un argument ; la trigonométrie lit l’angle en degrés.
fn applique_unaire(f: Unaire, a: f64) -> Result<f64, EvalError> {
    match f {
        Unaire::Sqrt => {
            if a < 0.0 {
                return Err(EvalError::NegativeSquareRoot);
            }
            Ok(a.sqrt())
        }
        Unaire::Carre => Ok(a * a),
        Unaire::Sin => Ok(a.to_radians().sin()),
        Unaire::Cos => Ok(a.to_radians().cos()),
        Unaire::Tan => Ok(a.to_radians().tan()),
        Unaire::Ln => {
            if a <= 0.0 {
                return Err(EvalError::InvalidNaturalLog);
            }
            Ok(a.ln())
        }
    }
}

/// log en base quelconque : ln(valeur) / ln(base).
fn logarithme(base: f64, valeur: f64) -> Result<f64, EvalError> {
    if base <= 0.0 || base == 1.0 || valeur <= 0.0 {
        return Err(EvalError::InvalidLogarithm);
    }
    Ok(valeur.ln() / base.ln())
}
