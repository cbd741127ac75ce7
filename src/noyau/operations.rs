// src/noyau/operations.rs
//
// Opérateurs tels qu’ils apparaissent à l’afficheur, et fonctions à un opérande.
// - Operateur : + − × ÷ % (glyphes d’affichage), avec l’opération binaire directe
//   du chemin “deux opérandes” hérité
// - OpUnaire  : √, x², 1/x

use super::erreurs::ErreurCalcul;
use super::expr::modulo_plancher;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
}

impl Operateur {
    pub const TOUS: [Operateur; 5] = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
        Operateur::Modulo,
    ];

    /// Glyphe écrit dans l’expression.
    pub fn glyphe(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '−',
            Operateur::Fois => '×',
            Operateur::Divise => '÷',
            Operateur::Modulo => '%',
        }
    }

    /// Accepte le glyphe d’affichage ou son équivalent ASCII.
    pub fn depuis_glyphe(c: char) -> Option<Operateur> {
        match c {
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            _ => Self::TOUS.into_iter().find(|op| op.glyphe() == c),
        }
    }

    /// Opération directe (chemin hérité) : mêmes gardes zéro que l’évaluateur,
    /// sauf le modulo qui a son propre message.
    pub fn appliquer(self, a: f64, b: f64) -> Result<f64, ErreurCalcul> {
        let r = match self {
            Operateur::Plus => a + b,
            Operateur::Moins => a - b,
            Operateur::Fois => a * b,
            Operateur::Divise => {
                if b == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                a / b
            }
            Operateur::Modulo => {
                if b == 0.0 {
                    return Err(ErreurCalcul::ModuloParZero);
                }
                modulo_plancher(a, b)
            }
        };
        fini(r)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Racine,
    Carre,
    Inverse,
}

impl OpUnaire {
    /// Libellé de touche.
    pub fn libelle(self) -> &'static str {
        match self {
            OpUnaire::Racine => "√",
            OpUnaire::Carre => "x²",
            OpUnaire::Inverse => "1/x",
        }
    }

    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalcul> {
        let r = match self {
            OpUnaire::Racine => {
                if x < 0.0 {
                    return Err(ErreurCalcul::Domaine);
                }
                x.sqrt()
            }
            OpUnaire::Carre => x * x,
            OpUnaire::Inverse => {
                if x == 0.0 {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                1.0 / x
            }
        };
        fini(r)
    }

    /// Formule du journal : "√(16)", "(3)²", "1/(4)".
    pub fn formule(self, operande: &str) -> String {
        match self {
            OpUnaire::Racine => format!("√({operande})"),
            OpUnaire::Carre => format!("({operande})²"),
            OpUnaire::Inverse => format!("1/({operande})"),
        }
    }
}

fn fini(r: f64) -> Result<f64, ErreurCalcul> {
    if r.is_finite() {
        Ok(r)
    } else {
        Err(ErreurCalcul::Debordement)
    }
}
