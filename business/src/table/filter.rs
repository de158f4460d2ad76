use super::{BoolLabels, Column, Row};

/// Whether any declared column of `row` contains `needle`.
///
/// `needle` must already be lowercased. Missing cells and action cells never match.
pub fn row_matches<A>(row: &Row<A>, columns: &[Column], needle: &str, labels: BoolLabels<'_>) -> bool {
    columns.iter().any(|column| {
        row.get(column.accessor)
            .and_then(|cell| cell.display(labels))
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Positions of the rows matching `query`, in source order.
///
/// A blank query (empty or whitespace only) keeps every row. Any other query is matched
/// as typed, surrounding whitespace included.
pub fn filter_indices<A>(
    rows: &[Row<A>],
    columns: &[Column],
    query: &str,
    labels: BoolLabels<'_>,
) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, columns, &needle, labels))
        .map(|(index, _)| index)
        .collect()
}

pub fn filter_rows<'r, A>(
    rows: &'r [Row<A>],
    columns: &[Column],
    query: &str,
    labels: BoolLabels<'_>,
) -> Vec<&'r Row<A>> {
    filter_indices(rows, columns, query, labels)
        .into_iter()
        .map(|index| &rows[index])
        .collect()
}
