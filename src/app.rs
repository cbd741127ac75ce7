// src/app.rs
//
// Module App (racine)
// -------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs + reglages.rs)
// - Ré-exporter AppCalc et Reglages (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Ordre d’une frame : clavier, vue, puis alerte (par-dessus le panneau).

pub mod etat;
pub mod reglages;
pub mod vue;

pub use etat::AppCalc;
pub use reglages::Reglages;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        self.ui_alerte(ctx);
    }
}
