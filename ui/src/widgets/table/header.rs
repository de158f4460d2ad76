use egui_extras::TableRow;
use snaily_business::table::Column;

pub fn render_table_header(header: &mut TableRow<'_, '_>, columns: &[Column]) {
    for column in columns {
        header.col(|ui| {
            ui.strong(&column.header);
        });
    }
}
