//! Standalone application wrapper for the scaler dialog.
//!
//! [`ScalerApp`] owns a [`ScalerSession`] plus the tab panels and implements
//! [`eframe::App`]. Each frame it first applies finished calculations, then
//! renders the tab bar and the active panel.

use eframe::egui;

use crate::panels::{CalculatorPanel, HistoryPanel, Panel};
use crate::session::ScalerSession;

pub struct ScalerApp {
    pub session: ScalerSession,
    pub panels: Vec<Box<dyn Panel>>,
}

impl ScalerApp {
    pub fn new(session: ScalerSession) -> Self {
        Self {
            session,
            panels: vec![
                Box::new(CalculatorPanel::default()),
                Box::new(HistoryPanel::default()),
            ],
        }
    }

    fn tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let active = self.session.controller.active_tab();
            for p in &self.panels {
                let tab = p.tab();
                if ui
                    .selectable_label(active == tab, p.title_and_icon())
                    .clicked()
                {
                    self.session.controller.set_active_tab(tab);
                }
            }
        });
    }

    /// Render the current tab into `ui`. Usable when embedding in a parent app.
    pub fn update_embedded(&mut self, ui: &mut egui::Ui) {
        self.session.pump();
        self.tab_bar(ui);
        ui.separator();
        let active = self.session.controller.active_tab();
        if let Some(p) = self.panels.iter_mut().find(|p| p.tab() == active) {
            p.render_panel(ui, &mut self.session);
        }
    }
}

impl eframe::App for ScalerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.update_embedded(ui);
        });

        // Keep the spinner moving while a request is pending.
        if self.session.controller.is_in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
