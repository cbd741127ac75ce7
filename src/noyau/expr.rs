// src/noyau/expr.rs
//
// AST arithmétique (flottants double précision).
// - Nombre : littéral
// - Neg    : moins unaire
// - Add/Sub/Mul/Div/Mod : opérateurs binaires (Mod = modulo “plancher”, signe du diviseur)
//
// IMPORTANT (SAFE):
// - evaluer() ne fait que de l’arithmétique : aucun nom, aucun appel, aucune variable.
// - Division ou modulo par zéro => DivisionParZero (jamais ±∞ en silence).

use std::fmt;

use super::erreurs::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Mod(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l’arbre. Le contrôle “fini / non fini” est fait une seule fois, en fin de pipeline.
    pub fn evaluer(&self) -> Result<f64, ErreurCalcul> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Neg(x) => Ok(-x.evaluer()?),

            Add(a, b) => Ok(a.evaluer()? + b.evaluer()?),
            Sub(a, b) => Ok(a.evaluer()? - b.evaluer()?),
            Mul(a, b) => Ok(a.evaluer()? * b.evaluer()?),

            Div(a, b) => {
                let (x, y) = (a.evaluer()?, b.evaluer()?);
                if y == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                Ok(x / y)
            }

            Mod(a, b) => {
                let (x, y) = (a.evaluer()?, b.evaluer()?);
                if y == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                Ok(modulo_plancher(x, y))
            }
        }
    }
}

/// Modulo “plancher” : le reste prend le signe du diviseur (-7 % 3 = 2, 7 % -3 = -2).
/// Précondition : b != 0.
pub fn modulo_plancher(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "-({x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Mod(a, b) => write!(f, "({a}%{b})"),
        }
    }
}
