use derive_more::Deref;
use rinse_core::{diag::Warning, value::Value};

///
/// ResultSet
///
/// Records matched by one query call, in collection order, together with
/// the warnings that evaluation produced along the way.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct ResultSet {
    #[deref]
    records: Vec<Value>,
    warnings: Vec<Warning>,
}

impl ResultSet {
    #[must_use]
    pub const fn new(records: Vec<Value>, warnings: Vec<Warning>) -> Self {
        Self { records, warnings }
    }

    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.records.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.records.last()
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.records
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Write the collected warnings to stderr.
    pub fn emit_warnings(&self) {
        for warning in &self.warnings {
            eprintln!("[rinse] {warning}");
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
