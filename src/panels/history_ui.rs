use chrono::{DateTime, Local};
use egui::Ui;
use egui_phosphor::regular::{CLOCK_COUNTER_CLOCKWISE, EXPORT, TRASH};
use egui_table::{HeaderRow as EgHeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelState};
use crate::controller::ActiveTab;
use crate::data::axis::Axis;
use crate::data::history::HistoryEntry;
use crate::persistence::export_history_json;
use crate::session::ScalerSession;

/// Read-only table of past calculations, newest first.
pub struct HistoryPanel {
    pub state: PanelState,
    /// Set after "Clear all" is clicked once; a second click confirms.
    confirm_clear: bool,
}

impl Default for HistoryPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("History", CLOCK_COUNTER_CLOCKWISE),
            confirm_clear: false,
        }
    }
}

/// Local-time rendering of a stored timestamp; falls back to the raw text.
pub fn display_timestamp(ts: &str) -> String {
    DateTime::parse_from_rfc3339(ts)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| ts.to_string())
}

fn range_text(e: &HistoryEntry, axis: Axis) -> String {
    let (lo, hi) = axis.bounds();
    format!("{} … {}", e.bound(lo), e.bound(hi))
}

struct HistoryDelegate<'a> {
    items: &'a [HistoryEntry],
}

impl TableDelegate for HistoryDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let text = match cell.col_range.start {
            0 => "Time",
            1 => "X range",
            2 => "Y range",
            3 => "Z range",
            4 => "Input",
            5 => "X",
            6 => "Y",
            7 => "Z",
            _ => "",
        };
        ui.add_space(4.0);
        ui.strong(text);
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(e) = self.items.get(cell.row_nr as usize) else {
            return;
        };
        ui.add_space(4.0);
        let text = match cell.col_nr {
            0 => display_timestamp(&e.timestamp),
            1 => range_text(e, Axis::X),
            2 => range_text(e, Axis::Y),
            3 => range_text(e, Axis::Z),
            4 => format!("{} = {}", e.input_axis.label(), e.input_value),
            5 => e.output_x.clone(),
            6 => e.output_y.clone(),
            7 if e.z_in_hex => format!("{} (hex)", e.output_z),
            7 => e.output_z.clone(),
            _ => String::new(),
        };
        ui.add(egui::Label::new(text).truncate().show_tooltip_when_elided(true));
    }
}

impl Panel for HistoryPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn tab(&self) -> ActiveTab {
        ActiveTab::History
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut ScalerSession) {
        let history = session.controller.history();
        let total = history.len();
        let shown = total.min(history.config().display_rows);

        ui.horizontal(|ui| {
            ui.label(format!("{total} entries"));
            if shown < total {
                ui.weak(format!("(showing latest {shown})"));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clear_label = if self.confirm_clear {
                    format!("{TRASH} Really clear?")
                } else {
                    format!("{TRASH} Clear all")
                };
                if ui
                    .add_enabled(total > 0, egui::Button::new(clear_label))
                    .on_hover_text("Delete all history entries")
                    .clicked()
                {
                    if self.confirm_clear {
                        session.controller.clear_history();
                        self.confirm_clear = false;
                    } else {
                        self.confirm_clear = true;
                    }
                }
                if ui
                    .add_enabled(total > 0, egui::Button::new(format!("{EXPORT} Export JSON")))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .set_file_name("scaling_history.json")
                        .add_filter("JSON", &["json"])
                        .save_file()
                    {
                        let entries = session.controller.history().entries();
                        if let Err(e) = export_history_json(entries, &path) {
                            log::error!("Failed to export history to {}: {e}", path.display());
                        }
                    }
                }
            });
        });
        ui.separator();

        let entries = session.controller.history().entries();
        if entries.is_empty() {
            self.confirm_clear = false;
            ui.centered_and_justified(|ui| ui.weak("No calculations yet"));
            return;
        }

        let mut delegate = HistoryDelegate {
            items: &entries[..shown],
        };
        let cols = vec![
            egui_table::Column::new(150.0),
            egui_table::Column::new(90.0),
            egui_table::Column::new(90.0),
            egui_table::Column::new(90.0),
            egui_table::Column::new(90.0),
            egui_table::Column::new(80.0),
            egui_table::Column::new(80.0),
            egui_table::Column::new(90.0),
        ];
        let avail_w = ui.available_width();
        let remaining_h = ui.available_height();
        let (rect, _resp) =
            ui.allocate_exact_size(egui::vec2(avail_w, remaining_h), egui::Sense::hover());
        let ui_builder = egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::left_to_right(egui::Align::Min));
        let mut table_ui = ui.new_child(ui_builder);
        Table::new()
            .id_salt("scaling_history_table")
            .num_rows(shown as u64)
            .columns(cols)
            .headers(vec![EgHeaderRow::new(24.0)])
            .show(&mut table_ui, &mut delegate);
    }
}
