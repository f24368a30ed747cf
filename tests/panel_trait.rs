use axis_scaler::controller::ActiveTab;
use axis_scaler::panels::history_ui::display_timestamp;
use axis_scaler::panels::*;

fn collapsed_label_for(p: &impl Panel) -> String {
    p.icon_only().to_string()
}

#[test]
fn calculator_panel_belongs_to_calculator_tab() {
    let p = CalculatorPanel::default();
    assert_eq!(p.tab(), ActiveTab::Calculator);
    assert_eq!(p.title(), "Calculator");
}

#[test]
fn history_panel_belongs_to_history_tab() {
    let p = HistoryPanel::default();
    assert_eq!(p.tab(), ActiveTab::History);
    assert_eq!(p.title(), "History");
}

#[test]
fn collapsed_label_uses_icon() {
    let p = HistoryPanel::default();
    let label = collapsed_label_for(&p);
    assert!(!label.contains(p.title()));
}

#[test]
fn full_label_contains_both_icon_and_title() {
    let p = CalculatorPanel::default();
    let label = p.title_and_icon();
    assert!(label.contains(p.title()));
    assert!(label.contains(p.icon_only()));
}

#[test]
fn unparseable_timestamp_is_shown_raw() {
    assert_eq!(display_timestamp("yesterday"), "yesterday");
    assert_ne!(display_timestamp("2026-10-15T12:00:00.000Z"), "2026-10-15T12:00:00.000Z");
}
