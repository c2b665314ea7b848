// src/noyau/jetons.rs
//
// Tokenisation : texte brut -> suite d’atomes.
// 1) on entoure de blancs chaque parenthèse, virgule et opérateur binaire
// 2) on découpe sur les blancs
// 3) on classe chaque morceau (nombre, opérateur, fonction, parenthèse)

use super::erreur::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Op {
    /// `*` `/` = 2 ; `+` `-` = 1 (tous associatifs à gauche).
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Minus => 1,
            Op::Star | Op::Slash => 2,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }
}

/// Fonctions à un argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unaire {
    Sqrt,
    Carre, // x^2
    Sin,
    Cos,
    Tan,
    Ln,
}

impl Unaire {
    pub fn nom(self) -> &'static str {
        match self {
            Unaire::Sqrt => "sqrt",
            Unaire::Carre => "x^2",
            Unaire::Sin => "sin",
            Unaire::Cos => "cos",
            Unaire::Tan => "tan",
            Unaire::Ln => "ln",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Atom {
    Num(f64),
    Op(Op),
    Unaire(Unaire),
    /// log(base, valeur)
    Log,
    LPar,
    RPar,
    Virgule,
}

/// Tokenize l’entrée accumulée par l’appelant.
///
/// Exemple : `"sqrt(9) + 2"` -> `[Unaire(Sqrt), LPar, Num(9), RPar, Op(Plus), Num(2)]`
pub fn tokenize(s: &str) -> Result<Vec<Atom>, EvalError> {
    espace_symboles(s)
        .split_whitespace()
        .map(classe_morceau)
        .collect()
}

/// Insère un blanc de chaque côté de `( ) , + - * /`.
///
/// Un `-` en position préfixe (début, ou après `( , + - * /`) et collé à un chiffre
/// reste attaché au nombre : `-3` est un nombre, pas un opérateur.
fn espace_symboles(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() * 2);
    let mut precedent: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '-' if est_moins_de_nombre(precedent, chars.get(i + 1).copied()) => {
                out.push(' ');
                out.push('-');
            }
            '(' | ')' | ',' | '+' | '-' | '*' | '/' => {
                out.push(' ');
                out.push(c);
                out.push(' ');
            }
            _ => out.push(c),
        }

        if !c.is_whitespace() {
            precedent = Some(c);
        }
    }

    out
}

fn est_moins_de_nombre(precedent: Option<char>, suivant: Option<char>) -> bool {
    let prefixe = match precedent {
        None => true,
        Some(p) => matches!(p, '(' | ',' | '+' | '-' | '*' | '/'),
    };
    let colle_chiffre = matches!(suivant, Some(c) if c.is_ascii_digit() || c == '.');
    prefixe && colle_chiffre
}

fn classe_morceau(morceau: &str) -> Result<Atom, EvalError> {
    let atom = match morceau {
        "(" => Atom::LPar,
        ")" => Atom::RPar,
        "," => Atom::Virgule,
        "+" => Atom::Op(Op::Plus),
        "-" => Atom::Op(Op::Minus),
        "*" => Atom::Op(Op::Star),
        "/" => Atom::Op(Op::Slash),
        _ if est_nombre(morceau) => {
            let x = morceau
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidToken(morceau.to_string()))?;
            // trop de chiffres pour un f64 : parse donne ±∞
            if !x.is_finite() {
                return Err(EvalError::NonFinite);
            }
            Atom::Num(x)
        }
        _ => match morceau.to_lowercase().as_str() {
            "sqrt" | "√" => Atom::Unaire(Unaire::Sqrt),
            "x^2" => Atom::Unaire(Unaire::Carre),
            "sin" => Atom::Unaire(Unaire::Sin),
            "cos" => Atom::Unaire(Unaire::Cos),
            "tan" => Atom::Unaire(Unaire::Tan),
            "ln" => Atom::Unaire(Unaire::Ln),
            "log" => Atom::Log,
            _ => return Err(EvalError::InvalidToken(morceau.to_string())),
        },
    };
    Ok(atom)
}

/// `-?` puis chiffres avec au plus un point, et au moins un chiffre.
/// Accepte `12`, `3.5`, `5.`, `.5`, `-0.25` ; refuse `1.2.3`, `.`, `12a`.
fn est_nombre(morceau: &str) -> bool {
    let corps = morceau.strip_prefix('-').unwrap_or(morceau);

    let mut chiffres = 0usize;
    let mut points = 0usize;
    for c in corps.chars() {
        match c {
            '0'..='9' => chiffres += 1,
            '.' => points += 1,
            _ => return false,
        }
    }

    chiffres > 0 && points <= 1
}

/// Rendu texte d’une suite d’atomes (journal de trace).
pub fn format_atomes(atomes: &[Atom]) -> String {
    let mut out = Vec::with_capacity(atomes.len());
    for a in atomes {
        let s = match a {
            Atom::Num(x) => format!("{x}"),
            Atom::Op(op) => op.symbole().to_string(),
            Atom::Unaire(f) => f.nom().to_string(),
            Atom::Log => "log".to_string(),
            Atom::LPar => "(".to_string(),
            Atom::RPar => ")".to_string(),
            Atom::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
