//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline et la machine d’état sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle : chaque expression générée porte sa valeur attendue
//! - invariant clé : afficheur jamais vide, "Error" <=> mode Erreur

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::eval::eval_expression;
use super::expr::modulo_plancher;
use super::format::format_resultat;
use super::operations::{OpUnaire, Operateur};
use super::saisie::{Jeton, Mode, OpMemoire, Session, MARQUEUR_ERREUR};

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
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Valeur attendue : Err(()) dès qu’un dénominateur vaut zéro.
type Attendu = Result<f64, ()>;

fn gen_atom(rng: &mut Rng) -> (String, Attendu) {
    match rng.pick(4) {
        0 => ("0".to_string(), Ok(0.0)),
        1 => {
            let n = rng.pick(100);
            (n.to_string(), Ok(f64::from(n)))
        }
        2 => {
            let n = rng.pick(1000);
            let txt = format!("{}.{}", n / 10, n % 10);
            let v = txt.parse::<f64>().unwrap_or(0.0);
            (txt, Ok(v))
        }
        _ => {
            let n = 1 + rng.pick(9);
            (format!("−{n}"), Ok(-f64::from(n)))
        }
    }
}

fn combine(op: Operateur, a: Attendu, b: Attendu) -> Attendu {
    let (x, y) = (a?, b?);
    match op {
        Operateur::Plus => Ok(x + y),
        Operateur::Moins => Ok(x - y),
        Operateur::Fois => Ok(x * y),
        Operateur::Divise if y == 0.0 => Err(()),
        Operateur::Divise => Ok(x / y),
        Operateur::Modulo if y == 0.0 => Err(()),
        Operateur::Modulo => Ok(modulo_plancher(x, y)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> (String, Attendu) {
    if depth == 0 || rng.pick(4) == 0 {
        return gen_atom(rng);
    }

    let op = Operateur::TOUS[rng.pick(5) as usize];
    let (ta, va) = gen_expr(rng, depth - 1);
    let (tb, vb) = gen_expr(rng, depth - 1);

    // toujours parenthésé : la valeur attendue ne dépend pas de la précédence
    (
        format!("({ta}{}{tb})", op.glyphe()),
        combine(op, va, vb),
    )
}

fn gen_jeton(rng: &mut Rng) -> Jeton {
    match rng.pick(14) {
        0..=4 => Jeton::Chiffre(rng.pick(10) as u8),
        5 => Jeton::Point,
        6 | 7 => Jeton::Operateur(Operateur::TOUS[rng.pick(5) as usize]),
        8 => Jeton::Parentheses,
        9 => Jeton::Egal,
        10 => match rng.pick(3) {
            0 => Jeton::ChangerSigne,
            1 => Jeton::Retour,
            _ => Jeton::ToutEffacer,
        },
        11 => Jeton::Unaire(match rng.pick(3) {
            0 => OpUnaire::Racine,
            1 => OpUnaire::Carre,
            _ => OpUnaire::Inverse,
        }),
        _ => Jeton::Memoire(match rng.pick(4) {
            0 => OpMemoire::Effacer,
            1 => OpMemoire::Rappeler,
            2 => OpMemoire::Ajouter,
            _ => OpMemoire::Soustraire,
        }),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_evaluateur_contre_oracle() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 5);

        match (eval_expression(&expr), attendu) {
            (Ok(v), Ok(a)) => {
                assert_eq!(v, a, "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(ErreurCalcul::DivisionParZero), Err(())) => seen_err += 1,
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}")
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_resultat_formate_reevaluable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let (expr, _) = gen_expr(&mut rng, 4);
        if let Ok(v) = eval_expression(&expr) {
            let txt = format_resultat(v);
            let relu = eval_expression(&txt).unwrap_or_else(|e| panic!("{txt:?} illisible: {e}"));
            // arrondi à 10 décimales, ou 3 chiffres significatifs en notation scientifique
            let tolerance = if txt.contains('e') {
                v.abs() * 5e-3
            } else {
                1e-10_f64.max(v.abs() * 1e-14)
            };
            assert!(
                (relu - v).abs() <= tolerance,
                "expr={expr:?} v={v} txt={txt:?}"
            );
        }
    }
}

#[test]
fn fuzz_safe_session_jetons() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0x5E55_104_u64);

    for _ in 0..200 {
        budget(t0, max);

        let mut s = Session::default();
        for _ in 0..40 {
            let j = gen_jeton(&mut rng);
            let r = s.appliquer(j);

            assert!(!s.affichage().is_empty(), "afficheur vide après {j:?}");
            assert_eq!(
                s.mode() == Mode::Erreur,
                s.affichage() == MARQUEUR_ERREUR,
                "affichage={:?} mode={:?}",
                s.affichage(),
                s.mode()
            );
            if r.is_err() {
                assert_eq!(s.mode(), Mode::Erreur);
            }
        }

        // un chiffre sort toujours de l’erreur
        assert!(s.appliquer(Jeton::Chiffre(7)).is_ok());
        assert_ne!(s.mode(), Mode::Erreur);
        assert_ne!(s.affichage(), MARQUEUR_ERREUR);

        // le journal ne contient que des calculs réussis, jamais le marqueur
        assert!(s.journal().iter().all(|e| e.resultat != MARQUEUR_ERREUR));
    }
}
