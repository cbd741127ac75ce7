//! src/app/etat.rs
//!
//! État UI (sans vue) : une session du noyau + l’alerte en cours.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par la session.
//! - Une alerte ouverte est bloquante : aucun jeton n’est appliqué tant qu’elle
//!   n’est pas fermée (la session est déjà en erreur, afficheur "Error").
//! - Pavé “deux opérandes” : chiffres, point et opérateurs vont au chemin hérité
//!   (saisie directe + opération posée) ; les autres touches sont communes.

use tracing::debug;

use super::reglages::Reglages;
use crate::noyau::erreurs::ErreurCalcul;
use crate::noyau::{Jeton, Mode, Operateur, OptionsSaisie, Session};

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub session: Session,

    /// Message de l’échec le plus récent, affiché en fenêtre modale.
    pub alerte: Option<String>,

    /// Panneau du journal déplié.
    pub journal_visible: bool,

    /// Routage du pavé vers le chemin “deux opérandes”.
    pub deux_operandes: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_options(OptionsSaisie::default())
    }
}

impl AppCalc {
    pub fn avec_options(options: OptionsSaisie) -> Self {
        Self {
            session: Session::avec_options(options),
            alerte: None,
            journal_visible: true,
            deux_operandes: false,
        }
    }

    pub fn depuis_reglages(reglages: &Reglages) -> Self {
        Self {
            deux_operandes: reglages.saisie.deux_operandes,
            ..Self::avec_options(reglages.options_saisie())
        }
    }

    /// Point d’entrée unique des touches (boutons + clavier).
    /// Retourne false si le jeton a été ignoré (alerte ouverte, touche sans effet).
    pub fn appliquer(&mut self, jeton: Jeton) -> bool {
        if self.alerte.is_some() {
            debug!(?jeton, "jeton ignoré : alerte ouverte");
            return false;
        }

        let resultat = if self.deux_operandes {
            match jeton {
                Jeton::Chiffre(d) => {
                    if let Some(c) = char::from_digit(u32::from(d), 10) {
                        self.session.saisir_nombre_brut(c);
                    }
                    Ok(())
                }
                Jeton::Point => {
                    self.session.saisir_nombre_brut('.');
                    Ok(())
                }
                Jeton::Operateur(op) => self.poser(op),
                // pas d’expression dans ce pavé
                Jeton::Parentheses => return false,
                _ => self.session.appliquer(jeton),
            }
        } else {
            self.session.appliquer(jeton)
        };

        if let Err(e) = resultat {
            self.alerte = Some(e.to_string());
        }
        debug!(
            affichage = self.session.affichage(),
            expression = self.session.expression(),
            "touche appliquée"
        );
        true
    }

    /// "a op b op" : un second nombre tapé sous une opération posée est d’abord calculé.
    fn poser(&mut self, op: Operateur) -> Result<(), ErreurCalcul> {
        if self.session.operateur_en_attente().is_some() && self.session.mode() == Mode::Initial {
            self.session.calculer()?;
        }
        self.session.poser_operation(op);
        Ok(())
    }

    pub fn fermer_alerte(&mut self) {
        self.alerte = None;
    }

    /// Texte de l’afficheur.
    pub fn affichage(&self) -> &str {
        self.session.affichage()
    }
}
