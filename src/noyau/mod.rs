//! Noyau de la calculatrice ligne
//!
//! Organisation interne :
//! - erreurs.rs    : erreurs typées (message = texte de l’alerte)
//! - jetons.rs     : tokenisation (alphabet de calcul strict)
//! - rpn.rs        : shunting-yard validant + construction Expr
//! - expr.rs       : AST arithmétique + évaluation
//! - eval.rs       : pipeline complet (glyphes -> f64)
//! - format.rs     : affichage d’un résultat
//! - operations.rs : opérateurs d’affichage + fonctions unaires
//! - saisie.rs     : machine d’état (afficheur, mémoire, journal)

pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod operations;
pub mod rpn;
pub mod saisie;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale (ce que l’hôte consomme)
pub use operations::{OpUnaire, Operateur};
pub use saisie::{Jeton, Mode, OpMemoire, OptionsSaisie, Session};
