//! Generic renderer for `snaily_business::table` rows.
//!
//! - `columns`: egui layout of each declared column
//! - `header`: header row
//! - `cells`: one render function per cell kind

mod cells;
pub mod columns;
pub mod header;

use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;
use snaily_business::table::{BoolLabels, Column, Row};

use cells::render_cell;
use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;

/// Renders the rows at `visible` positions of `rows`.
///
/// Action buttons for which `enabled` returns `false` are drawn disabled. Returns the
/// payload of the action button clicked this frame, if any.
pub fn data_table<A: Copy>(
    ui: &mut Ui,
    id_salt: &str,
    columns: &[Column],
    rows: &[Row<A>],
    visible: &[usize],
    labels: BoolLabels<'_>,
    enabled: impl Fn(&A) -> bool,
) -> Option<A> {
    let mut clicked = None;

    let mut builder = TableBuilder::new(ui)
        .id_salt(id_salt)
        .striped(true)
        .resizable(false)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns(columns) {
        builder = builder.column(column);
    }

    builder
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header, columns);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible.len(), |mut table_row| {
                let row = &rows[visible[table_row.index()]];
                for column in columns {
                    table_row.col(|ui| {
                        if let Some(action) = render_cell(ui, row.get(column.accessor), labels, &enabled) {
                            clicked = Some(action);
                        }
                    });
                }
            });
        });

    clicked
}
