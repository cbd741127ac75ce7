// src/noyau/format.rs
//
// Affichage d’un résultat numérique (une seule règle pour “=”, fonctions unaires,
// chemin binaire hérité et rappel mémoire).

/// Au-delà : plus d’affichage entier, notation scientifique.
const LIMITE_ENTIER: f64 = 1e10;

/// En deçà (non nul) : notation scientifique.
const SEUIL_PETIT: f64 = 1e-10;

/// Chiffres décimaux conservés avant affichage.
const DECIMALES: i32 = 10;

/// Formate une valeur pour l’afficheur :
/// - entier si la valeur est entière et |v| < 1e10 ("4", jamais "4.0")
/// - sinon arrondi à 10 décimales, puis
///   - notation scientifique à 2 décimales si |arrondi| ≥ 1e10 ou (v ≠ 0 et |arrondi| ≤ 1e-10)
///   - décimal le plus court sinon ("0.3" pour 0.1+0.2)
pub fn format_resultat(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }

    if v == v.trunc() && v.abs() < LIMITE_ENTIER {
        return format!("{}", v as i64);
    }

    let r = arrondi(v);
    if r.abs() >= LIMITE_ENTIER || (v != 0.0 && r.abs() <= SEUIL_PETIT) {
        // l’arrondi a pu écraser une très petite valeur : on garde alors l’originale
        let source = if r == 0.0 { v } else { r };
        return format_scientifique(source);
    }

    format!("{r}")
}

/// Notation scientifique, 2 décimales, exposant signé sur au moins 2 chiffres ("1.23e+12").
pub fn format_scientifique(v: f64) -> String {
    let brut = format!("{v:.2e}");
    match brut.split_once('e') {
        Some((mantisse, exp)) => match exp.parse::<i32>() {
            Ok(e) => {
                let signe = if e < 0 { '-' } else { '+' };
                format!("{mantisse}e{signe}{:02}", e.abs())
            }
            Err(_) => brut,
        },
        None => brut,
    }
}

fn arrondi(v: f64) -> f64 {
    if v.abs() >= LIMITE_ENTIER {
        return v;
    }
    let echelle = 10f64.powi(DECIMALES);
    (v * echelle).round() / echelle
}
