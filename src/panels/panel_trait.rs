use egui::Ui;

use crate::controller::ActiveTab;
use crate::session::ScalerSession;

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: &'static str,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self { title, icon }
    }
}

/// A tab of the scaler dialog.
pub trait Panel {
    fn state(&self) -> &PanelState;

    /// Tab this panel is shown under.
    fn tab(&self) -> ActiveTab;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn icon_only(&self) -> &'static str {
        self.state().icon
    }

    fn title_and_icon(&self) -> String {
        format!("{} {}", self.icon_only(), self.title())
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut ScalerSession);
}
