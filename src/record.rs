use std::collections::HashMap;

use crate::error::RecordError;

/// Column name to raw value for one record.
///
/// Built once per record by zipping the header with the row, then lent to
/// every rule evaluated against that record. Values borrow from the row and
/// are whitespace-trimmed; surrounding quotes are left for the evaluator.
///
/// # Examples
///
/// ```
/// use fractal::FieldMap;
///
/// let header = ["name", "age", "city"];
/// let row = ["John", " 25", "\"New York\""];
/// let fields = FieldMap::from_row(&header, &row).unwrap();
///
/// assert_eq!(fields.get("age"), Some("25"));
/// assert_eq!(fields.get("city"), Some("\"New York\""));
/// assert_eq!(fields.get("zip"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap<'a> {
    fields: HashMap<&'a str, &'a str>,
}

impl<'a> FieldMap<'a> {
    /// Zips `header` and `row` by position.
    ///
    /// Rows shorter or longer than the header are rejected; they are never
    /// padded or truncated.
    pub fn from_row<H, R>(header: &'a [H], row: &'a [R]) -> Result<Self, RecordError>
    where
        H: AsRef<str>,
        R: AsRef<str>,
    {
        if header.len() != row.len() {
            return Err(RecordError::ColumnCountMismatch {
                expected: header.len(),
                found: row.len(),
            });
        }

        let fields = header
            .iter()
            .zip(row)
            .map(|(name, value)| (name.as_ref().trim(), value.as_ref().trim()))
            .collect();

        Ok(FieldMap { fields })
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.fields.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Splits one delimited line into its columns.
///
/// A delimiter inside double quotes does not split; the quotes stay part of
/// the column text.
pub fn split_row(line: &str, delimiter: char) -> Vec<&str> {
    let mut columns = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (index, ch) in line.char_indices() {
        if ch == '"' {
            quoted = !quoted;
        } else if ch == delimiter && !quoted {
            columns.push(&line[start..index]);
            start = index + ch.len_utf8();
        }
    }
    columns.push(&line[start..]);

    columns
}

#[test]
fn test_split_row_respects_quotes() {
    assert_eq!(
        split_row(r#"Jane,30,"San Francisco, CA""#, ','),
        vec!["Jane", "30", r#""San Francisco, CA""#]
    );
}

#[test]
fn test_mismatched_row_is_rejected() {
    let header = ["name", "age", "city"];
    let row = ["John", "25"];
    assert_eq!(
        FieldMap::from_row(&header, &row),
        Err(RecordError::ColumnCountMismatch {
            expected: 3,
            found: 2
        })
    );
}
