// src/noyau/erreurs.rs
//
// Erreurs du noyau (évaluation + fonctions unaires + chemin binaire hérité).
// Le message (Display) est celui montré à l’utilisateur dans l’alerte.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Nombre de '(' différent du nombre de ')'.
    #[error("parenthèses non équilibrées")]
    ParenthesesDesequilibrees,

    /// "()" littéral dans l’expression.
    #[error("parenthèses vides interdites")]
    ParenthesesVides,

    /// Caractère hors de l’alphabet de calcul (rien n’est jamais interprété).
    #[error("caractère non autorisé : '{0}'")]
    CaractereNonAutorise(char),

    /// Suite de jetons mal formée (opérateur pendant, opérandes collés, nombre illisible…).
    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("division par zéro")]
    DivisionParZero,

    /// Seulement sur le chemin binaire hérité (dans une expression : DivisionParZero).
    #[error("modulo par zéro")]
    ModuloParZero,

    #[error("racine carrée d’un nombre négatif")]
    Domaine,

    /// Résultat non fini (±∞).
    #[error("résultat hors limites")]
    Debordement,
}
