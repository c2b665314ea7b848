//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - référence indépendante pour l’arithmétique sans parenthèses
//! - invariant clé : toute sortie est soit un nombre affichable, soit "Error: ..."

use std::time::{Duration, Instant};

use super::erreur::EvalError;
use super::eval::evaluate;
use super::eval_expression;
use super::DIGITS_DEFAUT;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Contrôles de sortie ------------------------ */

/// Un affichage valide : signe optionnel, chiffres, au plus 10 décimales sans zéro final.
fn check_affichage(expr: &str, s: &str) {
    let corps = s.strip_prefix('-').unwrap_or(s);
    assert!(corps != "0" || !s.starts_with('-'), "-0 pour {expr:?}");

    let (entier, frac) = corps.split_once('.').unwrap_or((corps, ""));
    assert!(
        !entier.is_empty() && entier.chars().all(|c| c.is_ascii_digit()),
        "partie entière invalide: expr={expr:?} sortie={s:?}"
    );
    assert!(
        frac.len() <= DIGITS_DEFAUT && frac.chars().all(|c| c.is_ascii_digit()),
        "décimales invalides: expr={expr:?} sortie={s:?}"
    );
    assert!(!frac.ends_with('0'), "zéro final: expr={expr:?} sortie={s:?}");
}

/// Ré-évaluer un résultat redonne le même texte, quelle que soit sa grandeur.
fn check_idempotence(expr: &str, s: &str) {
    if s.parse::<f64>().is_err() {
        panic!("sortie non numérique: expr={expr:?} sortie={s:?}");
    }
    let relu = eval_expression(s, DIGITS_DEFAUT)
        .unwrap_or_else(|e| panic!("relecture refusée: expr={expr:?} sortie={s:?} err={e}"));
    assert_eq!(relu, s, "expr={expr:?}");
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(100);
    let s = if rng.coin() {
        format!("{n}.{}", rng.pick(100))
    } else {
        format!("{n}")
    };
    // moins collé au nombre, comme après un résultat négatif
    if rng.pick(4) == 0 {
        format!("-{s}")
    } else {
        s
    }
}

fn gen_op(rng: &mut Rng) -> &'static str {
    match rng.pick(4) {
        0 => "+",
        1 => "-",
        2 => "*",
        _ => "/",
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(12) {
        0 | 1 => gen_nombre(rng),
        2..=4 => format!(
            "{} {} {}",
            gen_expr(rng, depth - 1),
            gen_op(rng),
            gen_expr(rng, depth - 1)
        ),
        5 => format!("({})", gen_expr(rng, depth - 1)),
        6 => format!("sqrt({})", gen_expr(rng, depth - 1)),
        7 => format!("x^2({})", gen_expr(rng, depth - 1)),
        8 => {
            let f = match rng.pick(3) {
                0 => "sin",
                1 => "cos",
                _ => "tan",
            };
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        9 => format!("ln({})", gen_expr(rng, depth - 1)),
        10 => format!(
            "log({}, {})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        _ => {
            // un peu de bruit : parenthèse en trop / manquante, opérateur doublé
            let e = gen_expr(rng, depth - 1);
            match rng.pick(3) {
                0 => format!("({e}"),
                1 => format!("{e})"),
                _ => format!("{e} {} {} 1", gen_op(rng), gen_op(rng)),
            }
        }
    }
}

/// Texte aléatoire sur l’alphabet du pavé (tout doit finir en Ok ou Err, sans panique).
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[&str] = &[
        "0", "1", "7", ".", " + ", " - ", "-", "*", "/", "(", ")", ", ", "sqrt", "x^2", "sin",
        "cos", "tan", "log", "ln", " ", "x", "^",
    ];
    let n = 1 + rng.pick(16) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Référence (sans parenthèses) ------------------------ */

/// Évaluation de référence : d’abord les termes (* /) de gauche à droite,
/// puis la somme (+ -) de gauche à droite. Même ordre d’opérations que les deux piles.
fn reference(nombres: &[f64], ops: &[char]) -> Option<f64> {
    let mut termes: Vec<f64> = vec![nombres[0]];
    let mut signes: Vec<char> = Vec::new();

    for (i, &op) in ops.iter().enumerate() {
        let b = nombres[i + 1];
        match op {
            '*' | '/' => {
                let a = termes.pop()?;
                if op == '/' && b == 0.0 {
                    return None;
                }
                termes.push(if op == '*' { a * b } else { a / b });
            }
            _ => {
                signes.push(op);
                termes.push(b);
            }
        }
    }

    let mut acc = termes[0];
    for (s, t) in signes.iter().zip(termes.iter().skip(1)) {
        acc = if *s == '+' { acc + t } else { acc - t };
    }
    Some(acc)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_arithmetique_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(8) as usize;
        let nombres: Vec<f64> = (0..=n).map(|_| rng.pick(20) as f64).collect();
        let ops: Vec<char> = (0..n)
            .map(|_| gen_op(&mut rng).chars().next().unwrap_or('+'))
            .collect();

        let mut expr = format!("{}", nombres[0]);
        for (op, b) in ops.iter().zip(nombres.iter().skip(1)) {
            expr.push_str(&format!(" {op} {b}"));
        }

        match (reference(&nombres, &ops), evaluate(&expr)) {
            (Some(r), Ok(x)) => assert_eq!(r, x, "expr={expr:?}"),
            (None, Err(EvalError::DivisionByZero)) => {}
            (r, x) => panic!("divergence: expr={expr:?} reference={r:?} noyau={x:?}"),
        }
    }
}

#[test]
fn fuzz_safe_sorties_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr, DIGITS_DEFAUT) {
            Ok(s) => {
                check_affichage(&expr, &s);
                check_idempotence(&expr, &s);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(e.starts_with("Error: "), "expr={expr:?} err={e}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let expr = gen_bruit(&mut rng);
        match eval_expression(&expr, DIGITS_DEFAUT) {
            Ok(s) => check_affichage(&expr, &s),
            Err(e) => assert!(e.starts_with("Error: "), "expr={expr:?} err={e}"),
        }
    }
}

#[test]
fn fuzz_safe_idempotence_grandes_valeurs() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0x1DE4_u64);

    // quotients de 1e3 à 1e9 : ce sont les valeurs à 16-19 chiffres significatifs
    for _ in 0..400 {
        budget(t0, max);

        let a = 1000 + rng.pick(999_000_000);
        let b = 1 + rng.pick(97);
        let expr = format!("{a} / {b}");
        let s = eval_expression(&expr, DIGITS_DEFAUT)
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        check_affichage(&expr, &s);
        check_idempotence(&expr, &s);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    // Même seed => mêmes expressions => mêmes sorties
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..100 {
        let ea = gen_expr(&mut a, 3);
        let eb = gen_expr(&mut b, 3);
        assert_eq!(ea, eb);
        assert_eq!(
            eval_expression(&ea, DIGITS_DEFAUT),
            eval_expression(&eb, DIGITS_DEFAUT)
        );
        // l’appel précédent ne laisse aucun état derrière lui
        assert_eq!(
            eval_expression(&ea, DIGITS_DEFAUT),
            eval_expression(&ea, DIGITS_DEFAUT)
        );
    }
}
