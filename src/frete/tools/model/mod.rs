use std::fmt;

/// Represents a single spreadsheet cell once it has been loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain string literal.
    Text(String),
    /// Floating point number literal.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
    /// Date-time stored as an Excel serial number.
    DateTime(f64),
    /// Explicit absence of a value.
    Missing,
}

impl Value {
    /// Returns `true` when the cell carries no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Coerces the cell into a finite number.
    ///
    /// Text is trimmed and parsed, booleans count as `1`/`0`. Date-times,
    /// missing cells and anything unparseable yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) if value.is_finite() => Some(*value),
            Value::Boolean(value) => Some(if *value { 1.0 } else { 0.0 }),
            Value::Text(text) => parse_number(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Number(value) | Value::DateTime(value) => write_number(f, *value),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Missing => Ok(()),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{value:.0}")
    } else {
        write!(f, "{value}")
    }
}

/// Parses a trimmed string as a finite number.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// An ordered, in-memory table: column labels plus rows aligned with them.
///
/// Rows are stored positionally so that a table can carry repeated labels
/// until duplicate resolution runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with the provided column labels.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from a header and rows, padding or truncating each row
    /// to the header width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the first column carrying `label`.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column_index(label).is_some()
    }

    /// Looks up the value stored under `label` for the given row.
    pub fn get(&self, row: usize, label: &str) -> Option<&Value> {
        let column = self.column_index(label)?;
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Iterates over the values of a column, if the column exists.
    pub fn column_values(&self, label: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let column = self.column_index(label)?;
        Some(self.rows.iter().map(move |row| &row[column]))
    }

    /// Appends a row, padding with [`Value::Missing`] or truncating to the
    /// current column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Missing);
        self.rows.push(row);
    }

    /// Replaces the values of `label`, or appends it as a new trailing column.
    ///
    /// `values` must contain one entry per row; shorter inputs are padded with
    /// [`Value::Missing`].
    pub fn set_column(&mut self, label: &str, values: Vec<Value>) {
        let column = self.ensure_column(label);
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row[column] = values.next().unwrap_or(Value::Missing);
        }
    }

    /// Applies `f` to every value of an existing column. Returns `false` when
    /// the column is absent.
    pub fn update_column<F>(&mut self, label: &str, mut f: F) -> bool
    where
        F: FnMut(&Value) -> Value,
    {
        let Some(column) = self.column_index(label) else {
            return false;
        };
        for row in &mut self.rows {
            row[column] = f(&row[column]);
        }
        true
    }

    /// Applies `f` to every cell of the table.
    pub fn update_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&Value) -> Option<Value>,
    {
        for cell in self.rows.iter_mut().flatten() {
            if let Some(replacement) = f(cell) {
                *cell = replacement;
            }
        }
    }

    /// Appends a row given as `(label, value)` pairs.
    ///
    /// Labels unknown to the table become new trailing columns, and earlier
    /// rows receive [`Value::Missing`] for them. Columns not named by the
    /// record stay missing in the new row.
    pub fn append_record<I>(&mut self, record: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut row = vec![Value::Missing; self.columns.len()];
        for (label, value) in record {
            let column = self.ensure_column(&label);
            if row.len() < self.columns.len() {
                row.resize(self.columns.len(), Value::Missing);
            }
            row[column] = value;
        }
        self.rows.push(row);
    }

    /// Appends every row of `other`, aligning its columns by label.
    pub fn extend_from(&mut self, other: &Table) {
        for row in &other.rows {
            let record = other.columns.iter().cloned().zip(row.iter().cloned());
            self.append_record(record);
        }
    }

    /// Replaces the column labels while keeping every row in place.
    ///
    /// # Panics
    ///
    /// Panics when `labels` does not have one entry per existing column.
    pub fn rename_columns(&mut self, labels: Vec<String>) {
        assert_eq!(
            labels.len(),
            self.columns.len(),
            "column relabelling must preserve the column count"
        );
        self.columns = labels;
    }

    fn ensure_column(&mut self, label: &str) -> usize {
        if let Some(column) = self.column_index(label) {
            return column;
        }
        self.columns.push(label.to_string());
        for row in &mut self.rows {
            row.push(Value::Missing);
        }
        self.columns.len() - 1
    }
}
