use egui::{Button, Color32, RichText, Ui};
use snaily_business::table::{ActionCell, BoolLabels, CellValue};

const COLOR_YES: Color32 = Color32::from_rgb(34, 139, 34);

/// Renders one cell. Returns the payload of a clicked action button.
pub fn render_cell<A: Copy>(
    ui: &mut Ui,
    cell: Option<&CellValue<A>>,
    labels: BoolLabels<'_>,
    enabled: &impl Fn(&A) -> bool,
) -> Option<A> {
    match cell {
        None => {
            ui.weak("-");
            None
        }
        Some(CellValue::Text(text)) => {
            ui.label(text);
            None
        }
        Some(CellValue::BooleanLabel(value)) => {
            render_bool_cell(ui, *value, labels);
            None
        }
        Some(CellValue::Action(cell)) => render_action_cell(ui, cell, enabled),
    }
}

fn render_bool_cell(ui: &mut Ui, value: bool, labels: BoolLabels<'_>) {
    let text = RichText::new(labels.label(value));
    if value {
        ui.label(text.color(COLOR_YES));
    } else {
        ui.label(text.weak());
    }
}

fn render_action_cell<A: Copy>(
    ui: &mut Ui,
    cell: &ActionCell<A>,
    enabled: &impl Fn(&A) -> bool,
) -> Option<A> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for button in &cell.buttons {
            if ui
                .add_enabled(enabled(&button.action), Button::new(&button.label))
                .clicked()
            {
                clicked = Some(button.action);
            }
        }
    });
    clicked
}
