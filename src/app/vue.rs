// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Afficheur une ligne + indicateur mémoire
// - Pavé de touches : chaque bouton produit un `Jeton`, rien d’autre
// - Clavier : caractères tapés -> `Jeton::depuis_caractere`,
//   Enter = "=", Backspace = del, Escape = C (ou ferme l’alerte)
// - Alerte modale sur échec
// - Journal des calculs réussis (plus récent en haut)
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{Jeton, OpMemoire, OpUnaire, Operateur};

const TAILLE_TOUCHE: [f32; 2] = [64.0, 44.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice");
                ui.add_space(6.0);

                self.ui_afficheur(ui);

                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_journal(ui);
            });
    }

    /// Clavier physique. Appelé une fois par frame, avant la vue.
    pub fn clavier(&mut self, ctx: &egui::Context) {
        let (textes, entree, retour, echap) = ctx.input(|i| {
            let textes: String = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect();
            (
                textes,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if self.alerte.is_some() {
            if entree || echap {
                self.fermer_alerte();
            }
            return;
        }

        for c in textes.chars() {
            if let Some(j) = Jeton::depuis_caractere(c) {
                self.appliquer(j);
            }
        }
        if entree {
            self.appliquer(Jeton::Egal);
        }
        if retour {
            self.appliquer(Jeton::Retour);
        }
        if echap {
            self.appliquer(Jeton::ToutEffacer);
        }
    }

    /// Fenêtre d’alerte (bloquante tant qu’elle est ouverte).
    pub fn ui_alerte(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alerte.clone() else {
            return;
        };

        let mut fermer = false;
        egui::Window::new("Erreur")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    fermer = true;
                }
            });

        if fermer {
            self.fermer_alerte();
        }
    }

    fn ui_afficheur(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    // indicateur mémoire non nulle
                    let m = if self.session.memoire() != 0.0 { "M" } else { " " };
                    ui.monospace(m);
                    // parenthèses encore ouvertes
                    let profondeur = self.session.profondeur_parentheses();
                    if profondeur > 0 {
                        ui.monospace(format!("({profondeur}"));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.affichage())
                                .monospace()
                                .size(30.0),
                        );
                    });
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        let en_attente = self.session.operateur_en_attente();

        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "MC", Jeton::Memoire(OpMemoire::Effacer));
                self.touche(ui, "MR", Jeton::Memoire(OpMemoire::Rappeler));
                self.touche(ui, "M+", Jeton::Memoire(OpMemoire::Ajouter));
                self.touche(ui, "M−", Jeton::Memoire(OpMemoire::Soustraire));
                ui.end_row();

                for op in [OpUnaire::Racine, OpUnaire::Carre, OpUnaire::Inverse] {
                    self.touche(ui, op.libelle(), Jeton::Unaire(op));
                }
                self.touche(ui, "del", Jeton::Retour);
                ui.end_row();

                self.touche(ui, "C", Jeton::ToutEffacer);
                if self.deux_operandes {
                    ui.add_enabled(false, egui::Button::new("( )").min_size(TAILLE_TOUCHE.into()));
                } else {
                    self.touche(ui, "( )", Jeton::Parentheses);
                }
                self.touche_operateur(ui, Operateur::Modulo, en_attente);
                self.touche_operateur(ui, Operateur::Divise, en_attente);
                ui.end_row();

                let rangees = [
                    ([7, 8, 9], Operateur::Fois),
                    ([4, 5, 6], Operateur::Moins),
                    ([1, 2, 3], Operateur::Plus),
                ];
                for (chiffres, op) in rangees {
                    for d in chiffres {
                        self.touche(ui, &d.to_string(), Jeton::Chiffre(d));
                    }
                    self.touche_operateur(ui, op, en_attente);
                    ui.end_row();
                }

                self.touche(ui, "+/−", Jeton::ChangerSigne);
                self.touche(ui, "0", Jeton::Chiffre(0));
                self.touche(ui, ".", Jeton::Point);
                self.touche(ui, "=", Jeton::Egal);
                ui.end_row();
            });
    }

    fn ui_journal(&mut self, ui: &mut egui::Ui) {
        let resp = egui::CollapsingHeader::new("Journal")
            .open(Some(self.journal_visible))
            .show(ui, |ui| {
                if self.session.journal().is_empty() {
                    ui.weak("aucun calcul");
                }
                for entree in self.session.journal().iter().rev() {
                    ui.monospace(entree.to_string());
                }
            });
        if resp.header_response.clicked() {
            self.journal_visible = !self.journal_visible;
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, libelle: &str, jeton: Jeton) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(libelle));
        if resp.clicked() {
            self.appliquer(jeton);
        }
    }

    /// Touche d’opérateur, surlignée si c’est l’opération posée (pavé “deux opérandes”).
    fn touche_operateur(&mut self, ui: &mut egui::Ui, op: Operateur, en_attente: Option<Operateur>) {
        let bouton =
            egui::Button::new(op.glyphe().to_string()).selected(en_attente == Some(op));
        if ui.add_sized(TAILLE_TOUCHE, bouton).clicked() {
            self.appliquer(Jeton::Operateur(op));
        }
    }
}
