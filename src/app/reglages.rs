// src/app/reglages.rs
//
// Réglages utilisateur (fichier TOML optionnel).
// Emplacement : <config_dir>/calculatrice_ligne/reglages.toml
//
// Tous les champs sont facultatifs : un fichier absent ou partiel donne les valeurs
// par défaut pour ce qui manque.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::noyau::OptionsSaisie;

const DOSSIER: &str = "calculatrice_ligne";
const FICHIER: &str = "reglages.toml";

#[derive(Debug, Error)]
pub enum ErreurReglages {
    #[error("lecture de {} impossible : {source}", chemin.display())]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("réglages invalides : {0}")]
    Syntaxe(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Reglages {
    pub saisie: ReglagesSaisie,
    pub journal: ReglagesJournal,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReglagesSaisie {
    pub multiplication_implicite: bool,
    /// Pavé “deux opérandes” : chiffres et opérateurs sans expression (a op b puis "=").
    pub deux_operandes: bool,
}

impl Default for ReglagesSaisie {
    fn default() -> Self {
        Self {
            multiplication_implicite: true,
            deux_operandes: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReglagesJournal {
    /// Directive de filtre `tracing` ("info", "debug", "calculatrice_ligne=trace"…).
    pub niveau: String,
}

impl Default for ReglagesJournal {
    fn default() -> Self {
        Self {
            niveau: "info".to_string(),
        }
    }
}

impl Reglages {
    /// None si le système ne fournit pas de dossier de configuration.
    pub fn chemin() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER).join(FICHIER))
    }

    /// Charge le fichier standard ; absent => défauts.
    pub fn charger() -> Result<Self, ErreurReglages> {
        match Self::chemin() {
            Some(chemin) => Self::charger_depuis(&chemin),
            None => Ok(Self::default()),
        }
    }

    pub fn charger_depuis(chemin: &Path) -> Result<Self, ErreurReglages> {
        match fs::read_to_string(chemin) {
            Ok(texte) => Self::depuis_texte(&texte),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ErreurReglages::Lecture {
                chemin: chemin.to_path_buf(),
                source,
            }),
        }
    }

    pub fn depuis_texte(texte: &str) -> Result<Self, ErreurReglages> {
        Ok(toml::from_str(texte)?)
    }

    pub fn options_saisie(&self) -> OptionsSaisie {
        OptionsSaisie {
            multiplication_implicite: self.saisie.multiplication_implicite,
        }
    }
}
