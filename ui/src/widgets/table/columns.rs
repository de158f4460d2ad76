//! Layout of the users tables.

use egui_extras::Column as LayoutColumn;
use snaily_business::table::Column;

pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 24.0;
pub const ACTIONS_WIDTH: f32 = 170.0;
pub const FLAG_MIN_WIDTH: f32 = 90.0;

/// The username column takes the remaining space, actions get a fixed slot.
pub fn table_columns(columns: &[Column]) -> Vec<LayoutColumn> {
    columns
        .iter()
        .map(|column| match column.accessor {
            "username" => LayoutColumn::remainder().at_least(120.0),
            "actions" => LayoutColumn::exact(ACTIONS_WIDTH),
            _ => LayoutColumn::auto().at_least(FLAG_MIN_WIDTH),
        })
        .collect()
}
