//! src/noyau/saisie.rs
//!
//! Machine d’état de saisie : reçoit les jetons un par un et maintient
//! l’afficheur, l’expression en cours, la mémoire et le journal.
//!
//! Contrats :
//! - L’afficheur n’est jamais vide ("0" au départ, "Error" après un échec).
//! - Aucune validation à la frappe : l’expression n’est jugée qu’au moment du calcul.
//! - La profondeur de parenthèses est toujours recalculée depuis l’expression.
//! - Mémoire et journal survivent à "C" (tout effacer).

use std::fmt;

use tracing::{debug, info, warn};

use super::erreurs::ErreurCalcul;
use super::eval::{eval_expression, normaliser};
use super::format::format_resultat;
use super::operations::{OpUnaire, Operateur};

/// Texte affiché après un échec.
pub const MARQUEUR_ERREUR: &str = "Error";

const AFFICHAGE_INITIAL: &str = "0";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Pas d’expression ouverte : "0", ou nombre tapé en saisie directe.
    #[default]
    Initial,
    /// Expression vivante : chaque jeton s’y ajoute.
    Saisie,
    /// Un résultat est affiché : un chiffre repart de zéro, un opérateur enchaîne.
    AttenteNouvelle,
    /// Dernière opération en échec : seul un chiffre relance la saisie.
    Erreur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMemoire {
    Effacer,
    Rappeler,
    Ajouter,
    Soustraire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// 0..=9 (toute autre valeur est ignorée).
    Chiffre(u8),
    Point,
    Operateur(Operateur),
    /// Touche "( )" : ouvrante ou fermante selon le contexte.
    Parentheses,
    ChangerSigne,
    Retour,
    ToutEffacer,
    Egal,
    Unaire(OpUnaire),
    Memoire(OpMemoire),
}

impl Jeton {
    /// Vocabulaire caractère -> jeton (chiffres, point, opérateurs, parenthèses, "=").
    pub fn depuis_caractere(c: char) -> Option<Jeton> {
        if let Some(d) = c.to_digit(10) {
            return Some(Jeton::Chiffre(d as u8));
        }
        match c {
            '.' => Some(Jeton::Point),
            '(' | ')' => Some(Jeton::Parentheses),
            '=' => Some(Jeton::Egal),
            _ => Operateur::depuis_glyphe(c).map(Jeton::Operateur),
        }
    }
}

/// Trace immuable d’un calcul réussi.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeJournal {
    pub formule: String,
    pub resultat: String,
}

impl fmt::Display for EntreeJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.formule, self.resultat)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OptionsSaisie {
    /// "8" puis "( )" donne "8×(" (sinon "8(").
    pub multiplication_implicite: bool,
}

impl Default for OptionsSaisie {
    fn default() -> Self {
        Self {
            multiplication_implicite: true,
        }
    }
}

/// Chemin “deux opérandes” hérité : opérande + opérateur posés par l’appelant.
#[derive(Clone, Copy, Debug, PartialEq)]
struct OperationEnAttente {
    operande: f64,
    operateur: Operateur,
}

#[derive(Clone, Debug)]
pub struct Session {
    affichage: String,
    expression: String,
    mode: Mode,
    memoire: f64,
    journal: Vec<EntreeJournal>,
    en_attente: Option<OperationEnAttente>,
    /// Résultat hérité affiché en mode Initial : le prochain nombre le remplace.
    resultat_herite: bool,
    options: OptionsSaisie,
}

impl Default for Session {
    fn default() -> Self {
        Self::avec_options(OptionsSaisie::default())
    }
}

impl Session {
    pub fn avec_options(options: OptionsSaisie) -> Self {
        Self {
            affichage: AFFICHAGE_INITIAL.to_string(),
            expression: String::new(),
            mode: Mode::Initial,
            memoire: 0.0,
            journal: Vec::new(),
            en_attente: None,
            resultat_herite: false,
            options,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    pub fn journal(&self) -> &[EntreeJournal] {
        &self.journal
    }

    /// Nombre de '(' non fermées dans l’expression.
    pub fn profondeur_parentheses(&self) -> usize {
        let ouvrantes = self.expression.chars().filter(|&c| c == '(').count();
        let fermantes = self.expression.chars().filter(|&c| c == ')').count();
        ouvrantes.saturating_sub(fermantes)
    }

    /// Vue dérivée pour l’hôte (surlignage de touche) : opérateur du chemin hérité.
    pub fn operateur_en_attente(&self) -> Option<Operateur> {
        self.en_attente.map(|a| a.operateur)
    }

    /* ------------------------ Entrée unique ------------------------ */

    /// Applique un jeton.
    ///
    /// `Err` : l’échec est DÉJÀ appliqué (afficheur "Error", mode Erreur) ;
    /// le message est destiné à l’alerte de l’hôte.
    pub fn appliquer(&mut self, jeton: Jeton) -> Result<(), ErreurCalcul> {
        debug!(?jeton, mode = ?self.mode, "jeton reçu");

        match jeton {
            Jeton::Chiffre(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.saisir(c);
                }
            }
            Jeton::Point => self.saisir('.'),
            Jeton::Operateur(op) => self.saisir(op.glyphe()),
            Jeton::Parentheses => self.basculer_parentheses(),
            Jeton::ChangerSigne => self.changer_signe(),
            Jeton::Retour => self.retour_arriere(),
            Jeton::ToutEffacer => self.tout_effacer(),
            Jeton::Egal => return self.calculer(),
            Jeton::Unaire(op) => return self.calculer_unaire(op),
            Jeton::Memoire(OpMemoire::Effacer) => self.memoire_effacer(),
            Jeton::Memoire(OpMemoire::Rappeler) => self.memoire_rappeler(),
            Jeton::Memoire(OpMemoire::Ajouter) => self.memoire_ajouter(),
            Jeton::Memoire(OpMemoire::Soustraire) => self.memoire_soustraire(),
        }

        Ok(())
    }

    /* ------------------------ Frappe ------------------------ */

    /// Chiffre, point ou glyphe d’opérateur.
    fn saisir(&mut self, c: char) {
        let chiffre = c.is_ascii_digit();

        match self.mode {
            Mode::Erreur => {
                if chiffre {
                    self.demarrer(c);
                }
                return;
            }
            // sur "0" le chiffre remplace ; un autre nombre affiché se prolonge
            Mode::Initial if chiffre && self.affichage == AFFICHAGE_INITIAL => {
                return self.demarrer(c)
            }
            Mode::AttenteNouvelle if chiffre || c == '.' => return self.demarrer(c),
            Mode::Initial if self.resultat_herite && (chiffre || c == '.') => {
                return self.demarrer(c)
            }
            // pas de zéro de tête
            Mode::Saisie if chiffre && self.expression == AFFICHAGE_INITIAL => {
                return self.demarrer(c)
            }
            _ => {}
        }

        self.ouvrir_expression();
        self.expression.push(c);
        self.affichage = self.expression.clone();
    }

    /// Touche "( )".
    pub fn basculer_parentheses(&mut self) {
        if self.mode == Mode::Erreur {
            return;
        }
        self.ouvrir_expression();

        let ouvrantes = self.expression.chars().filter(|&c| c == '(').count();
        let fermantes = self.expression.chars().filter(|&c| c == ')').count();
        let apres_valeur = self
            .expression
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit() || c == ')');

        let ajout = if ouvrantes == fermantes {
            if apres_valeur && self.options.multiplication_implicite {
                "×("
            } else {
                "("
            }
        } else if apres_valeur {
            ")"
        } else {
            // un opérateur ne peut pas être suivi de ')'
            "("
        };

        self.expression.push_str(ajout);
        self.affichage = self.expression.clone();
    }

    /// Touche "+/−" : '-' de tête de l’expression (ou du nombre affiché).
    pub fn changer_signe(&mut self) {
        if self.mode == Mode::Erreur {
            return;
        }

        if self.mode == Mode::Saisie && !self.expression.is_empty() {
            if self.expression != AFFICHAGE_INITIAL {
                inverser_signe(&mut self.expression);
                self.affichage = self.expression.clone();
            }
        } else if self.affichage != AFFICHAGE_INITIAL {
            inverser_signe(&mut self.affichage);
            self.synchroniser_hors_saisie();
        }

        // "-" seul, puis "+/−" : plus rien à afficher
        if self.affichage.is_empty() {
            self.reinitialiser_affichage();
        }
    }

    /// Touche "del".
    pub fn retour_arriere(&mut self) {
        if self.mode == Mode::Erreur {
            return;
        }

        if self.mode == Mode::Saisie && !self.expression.is_empty() {
            if self.expression.chars().count() > 1 {
                self.expression.pop();
                self.affichage = self.expression.clone();
            } else {
                self.reinitialiser_affichage();
            }
            return;
        }

        // saisie purement numérique (sans expression ouverte)
        if self.affichage.chars().count() > 1 {
            self.affichage.pop();
            self.synchroniser_hors_saisie();
        } else {
            self.reinitialiser_affichage();
        }
    }

    /// Touche "C" : afficheur + expression + opération en attente. Mémoire et journal restent.
    pub fn tout_effacer(&mut self) {
        self.reinitialiser_affichage();
        self.en_attente = None;
    }

    /* ------------------------ Calculs ------------------------ */

    /// Touche "=".
    ///
    /// - expression vivante : évaluation complète (l’opération héritée est abandonnée)
    /// - sinon opération héritée en attente : a op b, b = nombre affiché
    /// - sinon : rien (un deuxième "=" ne refait pas le calcul)
    pub fn calculer(&mut self) -> Result<(), ErreurCalcul> {
        if self.mode == Mode::Erreur {
            return Ok(());
        }

        if self.mode == Mode::Saisie && !self.expression.is_empty() {
            self.en_attente = None;
            return match eval_expression(&self.expression) {
                Ok(v) => {
                    let resultat = format_resultat(v);
                    let formule = std::mem::take(&mut self.expression);
                    self.consigner(formule, resultat.clone());
                    self.afficher_resultat(resultat);
                    Ok(())
                }
                Err(e) => Err(self.echec(e)),
            };
        }

        if let Some(attente) = self.en_attente.take() {
            return self.calculer_herite(attente);
        }

        Ok(())
    }

    /// Touches √, x², 1/x sur l’opérande courant.
    pub fn calculer_unaire(&mut self, op: OpUnaire) -> Result<(), ErreurCalcul> {
        if self.mode == Mode::Erreur {
            return Ok(());
        }

        let x = match self.operande_courant() {
            Ok(x) => x,
            Err(e) => return Err(self.echec(e)),
        };

        match op.appliquer(x) {
            Ok(v) => {
                let resultat = format_resultat(v);
                self.consigner(op.formule(&format_resultat(x)), resultat.clone());
                self.afficher_resultat(resultat);
                Ok(())
            }
            Err(e) => Err(self.echec(e)),
        }
    }

    /* ------------------------ Chemin hérité (deux opérandes) ------------------------ */

    /// Pose l’opérande courant et l’opérateur ; le prochain "=" fera a op b.
    /// Un opérande illisible est ignoré (aucun changement d’état).
    pub fn poser_operation(&mut self, operateur: Operateur) {
        if self.mode == Mode::Erreur {
            return;
        }

        match self.operande_courant() {
            Ok(operande) => {
                self.en_attente = Some(OperationEnAttente {
                    operande,
                    operateur,
                });
                self.affichage = format_resultat(operande);
                self.expression = self.affichage.clone();
                self.mode = Mode::AttenteNouvelle;
                self.resultat_herite = false;
                debug!(operande, ?operateur, "opération posée");
            }
            Err(e) => debug!(erreur = %e, "opération non posée"),
        }
    }

    /// Saisie numérique directe de l’afficheur, sans ouvrir d’expression.
    pub fn saisir_nombre_brut(&mut self, c: char) {
        let chiffre = c.is_ascii_digit();
        if !chiffre && c != '.' {
            return;
        }

        match self.mode {
            Mode::Saisie => return self.saisir(c),
            Mode::Erreur if !chiffre => return,
            Mode::Initial if !self.resultat_herite => {
                if chiffre && self.affichage == AFFICHAGE_INITIAL {
                    self.affichage = c.to_string();
                } else if chiffre || !self.affichage.contains('.') {
                    self.affichage.push(c);
                }
            }
            // nouveau nombre : erreur, résultat affiché ou opération posée
            _ => {
                self.affichage = if chiffre {
                    c.to_string()
                } else {
                    "0.".to_string()
                };
            }
        }

        self.expression.clear();
        self.mode = Mode::Initial;
        self.resultat_herite = false;
    }

    fn calculer_herite(&mut self, attente: OperationEnAttente) -> Result<(), ErreurCalcul> {
        let b = match self.operande_courant() {
            Ok(b) => b,
            Err(e) => return Err(self.echec(e)),
        };

        match attente.operateur.appliquer(attente.operande, b) {
            Ok(v) => {
                let resultat = format_resultat(v);
                let formule = format!(
                    "{} {} {}",
                    format_resultat(attente.operande),
                    attente.operateur.glyphe(),
                    format_resultat(b)
                );
                self.consigner(formule, resultat.clone());
                self.affichage = resultat;
                self.expression.clear();
                self.mode = Mode::Initial;
                self.resultat_herite = true;
                Ok(())
            }
            Err(e) => Err(self.echec(e)),
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// La valeur rappelée est directement éditable (mode Saisie).
    pub fn memoire_rappeler(&mut self) {
        if self.mode == Mode::Erreur {
            return;
        }
        self.expression = format_resultat(self.memoire);
        self.affichage = self.expression.clone();
        self.mode = Mode::Saisie;
        self.resultat_herite = false;
    }

    /// M+ : silencieux si l’opérande courant est illisible.
    pub fn memoire_ajouter(&mut self) {
        self.cumuler_memoire(1.0);
    }

    /// M− : silencieux si l’opérande courant est illisible.
    pub fn memoire_soustraire(&mut self) {
        self.cumuler_memoire(-1.0);
    }

    fn cumuler_memoire(&mut self, signe: f64) {
        match self.operande_courant() {
            Ok(x) => {
                let total = self.memoire + signe * x;
                if total.is_finite() {
                    self.memoire = total;
                    debug!(memoire = self.memoire, "mémoire mise à jour");
                } else {
                    debug!("mémoire inchangée (hors limites)");
                }
            }
            Err(e) => debug!(erreur = %e, "mémoire inchangée"),
        }
    }

    /* ------------------------ Outils internes ------------------------ */

    /// Expression vivante évaluée, sinon nombre affiché.
    fn operande_courant(&self) -> Result<f64, ErreurCalcul> {
        if self.mode == Mode::Saisie && !self.expression.is_empty() {
            eval_expression(&self.expression)
        } else {
            lire_nombre(&self.affichage)
        }
    }

    fn demarrer(&mut self, c: char) {
        self.expression = c.to_string();
        self.affichage = self.expression.clone();
        self.mode = Mode::Saisie;
        self.resultat_herite = false;
    }

    /// Hors saisie, l’expression repart du texte affiché.
    fn ouvrir_expression(&mut self) {
        if self.mode != Mode::Saisie {
            self.expression = self.affichage.clone();
            self.mode = Mode::Saisie;
            self.resultat_herite = false;
        }
    }

    fn synchroniser_hors_saisie(&mut self) {
        match self.mode {
            Mode::AttenteNouvelle => self.expression = self.affichage.clone(),
            Mode::Initial => self.expression.clear(),
            Mode::Saisie | Mode::Erreur => {}
        }
    }

    fn reinitialiser_affichage(&mut self) {
        self.affichage = AFFICHAGE_INITIAL.to_string();
        self.expression.clear();
        self.mode = Mode::Initial;
        self.resultat_herite = false;
    }

    fn afficher_resultat(&mut self, resultat: String) {
        self.expression = resultat.clone();
        self.affichage = resultat;
        self.mode = Mode::AttenteNouvelle;
        self.resultat_herite = false;
    }

    fn consigner(&mut self, formule: String, resultat: String) {
        info!(%formule, %resultat, "calcul");
        self.journal.push(EntreeJournal { formule, resultat });
    }

    fn echec(&mut self, e: ErreurCalcul) -> ErreurCalcul {
        warn!(erreur = %e, expression = %self.expression, "échec du calcul");
        self.affichage = MARQUEUR_ERREUR.to_string();
        self.expression.clear();
        self.en_attente = None;
        self.mode = Mode::Erreur;
        self.resultat_herite = false;
        e
    }
}

fn inverser_signe(s: &mut String) {
    if s.starts_with('-') {
        s.remove(0);
    } else {
        s.insert(0, '-');
    }
}

/// Nombre affiché -> valeur (glyphe '−' accepté ; "Error", "inf", "NaN" refusés).
fn lire_nombre(texte: &str) -> Result<f64, ErreurCalcul> {
    normaliser(texte)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ErreurCalcul::ExpressionInvalide)
}
