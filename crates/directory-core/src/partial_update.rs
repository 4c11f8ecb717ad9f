// ============================================================================
// Directory Core - Partial Update Builder
// File: crates/directory-core/src/partial_update.rs
// ============================================================================
//! Column assignments for a dynamic `UPDATE ... SET` statement.
//!
//! Only the fields a caller actually supplied become assignments, so the
//! generated statement never touches a column the caller left out.

use serde::Deserialize;

/// A typed value bound to one column. `None` writes SQL `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Integer(Option<i32>),
    Float(Option<f64>),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: FieldValue,
}

/// Ordered set of column assignments, one per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUpdate {
    assignments: Vec<Assignment>,
}

impl PartialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment, replacing an earlier one for the same column in place.
    pub fn set(&mut self, column: &'static str, value: FieldValue) -> &mut Self {
        match self.assignments.iter_mut().find(|a| a.column == column) {
            Some(existing) => existing.value = value,
            None => self.assignments.push(Assignment { column, value }),
        }
        self
    }

    /// Adds an assignment only when the field was supplied.
    pub fn set_if_present<T>(
        &mut self,
        column: &'static str,
        supplied: Option<T>,
        to_value: impl FnOnce(T) -> FieldValue,
    ) -> &mut Self {
        if let Some(value) = supplied {
            self.set(column, to_value(value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|a| a.column).collect()
    }

    /// Renders `col_a = $n, col_b = $n+1, ...` starting at `first_param`.
    ///
    /// Values are bound separately in `assignments()` order.
    pub fn set_clause(&self, first_param: usize) -> String {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{} = ${}", a.column, first_param + i))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Deserializes a present field as `Some(value)`, so `null` becomes `Some(None)`
/// and an absent field (via `#[serde(default)]`) stays `None`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
