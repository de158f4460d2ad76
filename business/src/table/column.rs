use std::fmt::Debug;

/// Localized labels used to show boolean cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolLabels<'a> {
    pub yes: &'a str,
    pub no: &'a str,
}

impl BoolLabels<'static> {
    pub const ENGLISH: Self = Self {
        yes: "Yes",
        no: "No",
    };
}

impl<'a> BoolLabels<'a> {
    pub fn label(&self, value: bool) -> &'a str {
        if value { self.yes } else { self.no }
    }
}

/// Header text plus the row field the column reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub accessor: &'static str,
}

impl Column {
    pub fn new(header: impl Into<String>, accessor: &'static str) -> Self {
        Self {
            header: header.into(),
            accessor,
        }
    }
}

/// A button inside a cell. Clicking it yields `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton<A> {
    pub label: String,
    pub action: A,
}

/// Buttons shown side by side in one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCell<A> {
    pub buttons: Vec<ActionButton<A>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue<A> {
    Text(String),
    /// Shown as the localized yes/no label, and matched by that label.
    BooleanLabel(bool),
    /// Never matched by the search query.
    Action(ActionCell<A>),
}

impl<A> CellValue<A> {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn action(label: impl Into<String>, action: A) -> Self {
        Self::actions([(label.into(), action)])
    }

    pub fn actions(buttons: impl IntoIterator<Item = (String, A)>) -> Self {
        Self::Action(ActionCell {
            buttons: buttons
                .into_iter()
                .map(|(label, action)| ActionButton { label, action })
                .collect(),
        })
    }

    /// Text shown for the cell, or `None` for interactive cells.
    pub fn display<'a>(&'a self, labels: BoolLabels<'a>) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::BooleanLabel(value) => Some(labels.label(*value)),
            Self::Action(_) => None,
        }
    }
}

/// One table record: cells keyed by column accessor, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<A> {
    cells: Vec<(&'static str, CellValue<A>)>,
}

impl<A> Default for Row<A> {
    fn default() -> Self {
        Self { cells: Vec::new() }
    }
}

impl<A> Row<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell for `accessor`, replacing an existing one.
    #[must_use]
    pub fn with(mut self, accessor: &'static str, value: CellValue<A>) -> Self {
        match self.cells.iter_mut().find(|(key, _)| *key == accessor) {
            Some((_, cell)) => *cell = value,
            None => self.cells.push((accessor, value)),
        }
        self
    }

    pub fn get(&self, accessor: &str) -> Option<&CellValue<A>> {
        self.cells
            .iter()
            .find(|(key, _)| *key == accessor)
            .map(|(_, cell)| cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
