// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en validant la structure au passage
// - Puis reconstruire Expr
//
// Règles:
// - Précédence : moins unaire (3) > * / % (2) > + - (1), binaires associatifs à gauche.
// - '+' / '-' quand on n’attend PAS d’opérateur => préfixe (le '+' préfixe est absorbé),
//   donc "5+-3" = 5 + (-3) et "5--3" = 5 - (-3).
// - '*' '/' '%' quand on n’attend pas d’opérateur => expression invalide ("5*/3").
// - Deux valeurs qui se touchent ("2(3)", "(2)(3)", "2 3") => expression invalide.

use super::erreurs::ErreurCalcul;
use super::expr::Expr;
use super::jetons::Tok;

/// Élément de sortie RPN.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Clone, Copy, Debug)]
enum Pile {
    LPar,
    Op(Rpn),
}

fn precedence(op: Rpn) -> i32 {
    match op {
        Rpn::Add | Rpn::Sub => 1,
        Rpn::Mul | Rpn::Div | Rpn::Mod => 2,
        Rpn::Neg => 3,
        Rpn::Num(_) => 0,
    }
}

fn binaire(tok: Tok) -> Option<Rpn> {
    match tok {
        Tok::Plus => Some(Rpn::Add),
        Tok::Minus => Some(Rpn::Sub),
        Tok::Star => Some(Rpn::Mul),
        Tok::Slash => Some(Rpn::Div),
        Tok::Percent => Some(Rpn::Mod),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, Minus, Num(3)]
///   rpn:    [Num(2), Num(3), Neg, Mul]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un nombre ou une parenthèse fermée.
    // Sert à distinguer préfixe / binaire et à refuser les opérandes collés.
    let mut prev_was_value = false;

    for &tok in tokens {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                out.push(Rpn::Num(v));
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                ops.push(Pile::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => out.push(op),
                        None => return Err(ErreurCalcul::ParenthesesDesequilibrees),
                    }
                }
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                if tok == Tok::Minus {
                    // préfixe : ne dépile rien
                    ops.push(Pile::Op(Rpn::Neg));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent => {
                if !prev_was_value {
                    return Err(ErreurCalcul::ExpressionInvalide);
                }
                let op = binaire(tok).ok_or(ErreurCalcul::ExpressionInvalide)?;
                let p = precedence(op);

                while let Some(&Pile::Op(top)) = ops.last() {
                    if precedence(top) < p {
                        break;
                    }
                    out.push(top);
                    ops.pop();
                }

                ops.push(Pile::Op(op));
                prev_was_value = false;
            }
        }
    }

    // opérateur pendant (ou entrée vide)
    if !prev_was_value {
        return Err(ErreurCalcul::ExpressionInvalide);
    }

    while let Some(p) = ops.pop() {
        match p {
            Pile::LPar => return Err(ErreurCalcul::ParenthesesDesequilibrees),
            Pile::Op(op) => out.push(op),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Rpn]) -> Result<Expr, ErreurCalcul> {
    let mut st: Vec<Expr> = Vec::new();

    for &r in rpn {
        let e = match r {
            Rpn::Num(v) => Expr::Nombre(v),
            Rpn::Neg => {
                let x = st.pop().ok_or(ErreurCalcul::ExpressionInvalide)?;
                Expr::Neg(Box::new(x))
            }
            Rpn::Add | Rpn::Sub | Rpn::Mul | Rpn::Div | Rpn::Mod => {
                let b = Box::new(st.pop().ok_or(ErreurCalcul::ExpressionInvalide)?);
                let a = Box::new(st.pop().ok_or(ErreurCalcul::ExpressionInvalide)?);
                match r {
                    Rpn::Add => Expr::Add(a, b),
                    Rpn::Sub => Expr::Sub(a, b),
                    Rpn::Mul => Expr::Mul(a, b),
                    Rpn::Div => Expr::Div(a, b),
                    _ => Expr::Mod(a, b),
                }
            }
        };
        st.push(e);
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(ErreurCalcul::ExpressionInvalide),
    }
}

/// Format utilitaire (journal debug) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Neg => "neg".to_string(),
            Rpn::Add => "+".to_string(),
            Rpn::Sub => "-".to_string(),
            Rpn::Mul => "*".to_string(),
            Rpn::Div => "/".to_string(),
            Rpn::Mod => "%".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
