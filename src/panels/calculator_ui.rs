use egui::{Color32, RichText, TextEdit, Ui};
use egui_phosphor::regular::{CALCULATOR, WARNING};

use super::panel_trait::{Panel, PanelState};
use crate::controller::ActiveTab;
use crate::data::axis::{Axis, RangeBound};
use crate::session::ScalerSession;

/// Range inputs, axis selector, per-axis values and the hex toggle.
pub struct CalculatorPanel {
    pub state: PanelState,
}

impl Default for CalculatorPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Calculator", CALCULATOR),
        }
    }
}

/// `true` when Enter was pressed while `resp` had focus.
fn committed(ui: &Ui, resp: &egui::Response) -> bool {
    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

impl CalculatorPanel {
    fn ranges_ui(&mut self, ui: &mut Ui, session: &mut ScalerSession) {
        let mut enter = false;
        egui::Grid::new("scaler_ranges")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("");
                ui.strong("Min");
                ui.strong("Max");
                ui.end_row();
                for axis in Axis::ALL {
                    ui.label(format!("{} range", axis.label()));
                    let (lo, hi) = axis.bounds();
                    for bound in [lo, hi] {
                        enter |= bound_edit(ui, session, bound);
                    }
                    ui.end_row();
                }
            });
        if enter {
            let t = session.controller.trigger_calculation();
            session.dispatch(t);
        }
    }

    fn axis_ui(&mut self, ui: &mut Ui, session: &mut ScalerSession) {
        ui.horizontal(|ui| {
            ui.label("Scale from:");
            let selected = session.controller.selected_axis();
            for axis in Axis::ALL {
                if ui.radio(selected == axis, axis.label()).clicked() && selected != axis {
                    let t = session.controller.select_axis(axis);
                    session.dispatch(t);
                }
            }
        });

        let mut enter = false;
        egui::Grid::new("scaler_values")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                let selected = session.controller.selected_axis();
                for axis in Axis::ALL {
                    let label = if axis == selected {
                        RichText::new(format!("{} (input)", axis.label())).strong()
                    } else {
                        RichText::new(axis.label())
                    };
                    ui.label(label);
                    let mut text = session.controller.axis_values().get(axis).to_string();
                    let resp = ui.add(
                        TextEdit::singleline(&mut text)
                            .id_salt(("axis_value", axis.id()))
                            .desired_width(180.0),
                    );
                    if resp.changed() {
                        session.controller.set_axis_value(axis, text);
                    }
                    enter |= committed(ui, &resp);
                    ui.end_row();
                }
            });
        if enter {
            let t = session.controller.trigger_calculation();
            session.dispatch(t);
        }

        let mut hex = session.controller.z_in_hex();
        if ui
            .checkbox(&mut hex, "Z in hex")
            .on_hover_text("Show the Z value in hexadecimal (truncated to an integer)")
            .changed()
        {
            let t = session.controller.set_z_in_hex(hex);
            session.dispatch(t);
        }
    }
}

fn bound_edit(ui: &mut Ui, session: &mut ScalerSession, bound: RangeBound) -> bool {
    let mut text = session.controller.ranges().get(bound).to_string();
    let resp = ui.add(
        TextEdit::singleline(&mut text)
            .id_salt(("range", bound.name()))
            .hint_text(bound.name())
            .desired_width(110.0),
    );
    if resp.changed() {
        session.controller.set_range(bound, text);
    }
    committed(ui, &resp)
}

impl Panel for CalculatorPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn tab(&self) -> ActiveTab {
        ActiveTab::Calculator
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut ScalerSession) {
        self.ranges_ui(ui, session);
        ui.separator();
        self.axis_ui(ui, session);
        ui.separator();

        ui.horizontal(|ui| {
            let busy = session.controller.is_in_flight();
            if ui
                .add_enabled(!busy, egui::Button::new("Calculate"))
                .on_hover_text("Scale the selected axis value onto all axes [Enter]")
                .clicked()
            {
                let t = session.controller.trigger_calculation();
                session.dispatch(t);
            }
            if busy {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(session.service().describe());
            });
        });

        if let Some(err) = session.controller.last_error() {
            ui.colored_label(Color32::from_rgb(220, 80, 60), format!("{WARNING} {err}"));
        }
    }
}
