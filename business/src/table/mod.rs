//! Client-side filterable table.
//!
//! A table is a list of [`Row`]s plus the [`Column`]s that declare which row fields are
//! shown. Filtering keeps the rows where any declared, non-action column contains the
//! query, ignoring case, in their original order.

mod column;
mod filter;

pub use column::{ActionButton, ActionCell, BoolLabels, CellValue, Column, Row};
pub use filter::{filter_indices, filter_rows, row_matches};
