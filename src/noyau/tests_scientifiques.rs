//! Tests scientifiques (campagne) : propriétés + invariants + limites contrôlées.
//!
//! But : vérifier l’évaluateur et la machine d’état sur des entrées générées.
//! - propriétés proptest (précédence, parenthèses, zéro au dénominateur, formatage)
//! - invariants de session sur des suites de jetons arbitraires
//! - stress borné par un budget temps

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::erreurs::ErreurCalcul;
use super::eval::eval_expression;
use super::format::format_resultat;
use super::operations::{OpUnaire, Operateur};
use super::saisie::{Jeton, Mode, OpMemoire, Session, MARQUEUR_ERREUR};

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn un_jeton() -> impl Strategy<Value = Jeton> {
    prop_oneof![
        4 => (0u8..10).prop_map(Jeton::Chiffre),
        1 => Just(Jeton::Point),
        3 => prop::sample::select(Operateur::TOUS.to_vec()).prop_map(Jeton::Operateur),
        2 => Just(Jeton::Parentheses),
        1 => Just(Jeton::ChangerSigne),
        1 => Just(Jeton::Retour),
        1 => Just(Jeton::ToutEffacer),
        2 => Just(Jeton::Egal),
        1 => prop::sample::select(vec![OpUnaire::Racine, OpUnaire::Carre, OpUnaire::Inverse])
            .prop_map(Jeton::Unaire),
        1 => prop::sample::select(vec![
            OpMemoire::Effacer,
            OpMemoire::Rappeler,
            OpMemoire::Ajouter,
            OpMemoire::Soustraire,
        ])
        .prop_map(Jeton::Memoire),
    ]
}

/* ------------------------ Évaluateur ------------------------ */

proptest! {
    #[test]
    fn sci_precedence_produit_avant_somme(a in 0i64..10_000, b in 0i64..10_000, c in 0i64..10_000) {
        let attendu = (a + b * c) as f64;
        prop_assert_eq!(eval_expression(&format!("{a}+{b}*{c}")), Ok(attendu));
        prop_assert_eq!(eval_expression(&format!("{a}+{b}×{c}")), Ok(attendu));
    }

    #[test]
    fn sci_parentheses_prioritaires(a in 0i64..10_000, b in 0i64..10_000, c in 0i64..10_000) {
        let attendu = ((a + b) * c) as f64;
        prop_assert_eq!(eval_expression(&format!("({a}+{b})*{c}")), Ok(attendu));
    }

    #[test]
    fn sci_soustraction_associative_a_gauche(a in 0i64..10_000, b in 0i64..10_000, c in 0i64..10_000) {
        let attendu = (a - b - c) as f64;
        prop_assert_eq!(eval_expression(&format!("{a}−{b}−{c}")), Ok(attendu));
    }

    #[test]
    fn sci_comptes_inegaux(s in "[0-9+*/%.()-]{0,24}") {
        let o = s.chars().filter(|&c| c == '(').count();
        let f = s.chars().filter(|&c| c == ')').count();
        prop_assume!(o != f);
        prop_assert_eq!(eval_expression(&s), Err(ErreurCalcul::ParenthesesDesequilibrees));
    }

    #[test]
    fn sci_parentheses_vides(g in "[0-9+*]{0,6}", d in "[0-9+*]{0,6}") {
        let s = format!("{g}(){d}");
        prop_assert_eq!(eval_expression(&s), Err(ErreurCalcul::ParenthesesVides));
    }

    #[test]
    fn sci_zero_au_denominateur(x in 0u32..100_000, op in prop::sample::select(vec!['/', '%', '÷'])) {
        prop_assert_eq!(eval_expression(&format!("{x}{op}0")), Err(ErreurCalcul::DivisionParZero));
    }

    #[test]
    fn sci_format_entiers(i in -9_999_999_999i64..=9_999_999_999i64) {
        prop_assert_eq!(format_resultat(i as f64), i.to_string());
    }

    #[test]
    fn sci_format_decimal_sans_zero_final(v in -1e9f64..1e9f64) {
        let txt = format_resultat(v);
        prop_assert!(!txt.is_empty());
        if txt.contains('.') && !txt.contains('e') {
            prop_assert!(!txt.ends_with('0'), "zéro final: {}", txt);
            prop_assert!(!txt.ends_with('.'), "point final: {}", txt);
        }
    }

    #[test]
    fn sci_format_relisible(v in -1e15f64..1e15f64) {
        // l’afficheur doit pouvoir servir d’opérande en enchaînement
        let txt = format_resultat(v);
        prop_assert!(eval_expression(&txt).is_ok(), "illisible: {}", txt);
    }
}

/* ------------------------ Machine d’état ------------------------ */

proptest! {
    #[test]
    fn sci_session_invariants(jetons in prop::collection::vec(un_jeton(), 0..60)) {
        let mut s = Session::default();
        for j in jetons {
            let r = s.appliquer(j);

            prop_assert!(!s.affichage().is_empty());
            prop_assert_eq!(s.mode() == Mode::Erreur, s.affichage() == MARQUEUR_ERREUR);
            if r.is_err() {
                prop_assert_eq!(s.mode(), Mode::Erreur);
                prop_assert!(s.expression().is_empty());
            }
            if s.mode() == Mode::Saisie {
                prop_assert_eq!(s.affichage(), s.expression());
            }
            prop_assert!(s.memoire().is_finite());
        }
    }

    #[test]
    fn sci_un_chiffre_sort_toujours_de_l_erreur(
        jetons in prop::collection::vec(un_jeton(), 0..40),
        d in 0u8..10,
    ) {
        let mut s = Session::default();
        for j in jetons {
            let _ = s.appliquer(j);
        }
        let _ = s.appliquer(Jeton::Chiffre(d));
        prop_assert_ne!(s.mode(), Mode::Erreur);
        prop_assert_ne!(s.affichage(), MARQUEUR_ERREUR);
    }

    #[test]
    fn sci_egal_repete_sans_effet(jetons in prop::collection::vec(un_jeton(), 0..40)) {
        let mut s = Session::default();
        for j in jetons {
            let _ = s.appliquer(j);
        }
        if s.appliquer(Jeton::Egal).is_ok() {
            let affichage = s.affichage().to_string();
            let n = s.journal().len();
            prop_assert!(s.appliquer(Jeton::Egal).is_ok());
            prop_assert_eq!(s.affichage(), affichage.as_str());
            prop_assert_eq!(s.journal().len(), n);
        }
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["0.5"; 2000].join("+");
    budget(t0, max);

    assert_eq!(eval_expression(&expr), Ok(1000.0));
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // ((((1+1)+1)+1)...)
    let n = 300;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    assert_eq!(eval_expression(&expr), Ok((n + 1) as f64));
    budget(t0, max);
}

#[test]
fn sci_stress_saisie_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut s = Session::default();
    for k in 0..500u32 {
        let _ = s.appliquer(Jeton::Chiffre((k % 10) as u8));
        let _ = s.appliquer(Jeton::Operateur(Operateur::Plus));
    }
    let _ = s.appliquer(Jeton::Chiffre(0));
    assert!(s.appliquer(Jeton::Egal).is_ok());
    // 50 × (0+1+…+9) = 2250
    assert_eq!(s.affichage(), "2250");
    budget(t0, max);
}
