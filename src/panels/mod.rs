pub mod calculator_ui;
pub mod history_ui;
pub mod panel_trait;

pub use calculator_ui::CalculatorPanel;
pub use history_ui::HistoryPanel;
pub use panel_trait::{Panel, PanelState};
