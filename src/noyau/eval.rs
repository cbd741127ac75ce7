//! Noyau : évaluation (pipeline réel)
//!
//! glyphes -> contrôles parenthèses -> jetons -> RPN (validée) -> Expr -> f64 fini
//!
//! Aucun interpréteur généraliste : l’alphabet accepté est exactement celui
//! des nombres, des cinq opérateurs et des parenthèses.

use tracing::debug;

use super::erreurs::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Glyphes d’affichage -> opérateurs de calcul (× -> *, ÷ -> /, − -> -).
pub fn normaliser(expr_str: &str) -> String {
    expr_str
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            _ => c,
        })
        .collect()
}

/// API publique : évalue une expression (glyphes d’affichage acceptés) en double précision.
pub fn eval_expression(expr_str: &str) -> Result<f64, ErreurCalcul> {
    // 1) Glyphes
    let s = normaliser(expr_str);

    // 2) Parenthèses : comptage puis "()" littéral
    let ouvrantes = s.chars().filter(|&c| c == '(').count();
    let fermantes = s.chars().filter(|&c| c == ')').count();
    if ouvrantes != fermantes {
        return Err(ErreurCalcul::ParenthesesDesequilibrees);
    }
    if s.contains("()") {
        return Err(ErreurCalcul::ParenthesesVides);
    }

    // 3) Jetons
    let jetons = tokenize(&s)?;

    // 4) RPN
    let rpn = to_rpn(&jetons)?;
    debug!(
        jetons = %format_tokens(&jetons),
        rpn = %format_rpn(&rpn),
        "expression analysée"
    );

    // 5) AST puis valeur
    let valeur = from_rpn(&rpn)?.evaluer()?;
    if !valeur.is_finite() {
        return Err(ErreurCalcul::Debordement);
    }

    Ok(valeur)
}
