use egui::Ui;
use snaily_business::TabsState;

/// Row of tab titles. Returns the index of the tab the user clicked, if any.
pub fn tab_bar(ui: &mut Ui, titles: &[String], tabs: &TabsState) -> Option<usize> {
    let mut clicked = None;

    ui.horizontal(|ui| {
        for (index, title) in titles.iter().enumerate() {
            if ui.selectable_label(tabs.is_active(index), title).clicked() {
                clicked = Some(index);
            }
        }
    });

    clicked
}
