use crate::error::{Result, ViewError};
use crate::tensor::TensorField;

/// Named per-site fields in insertion order.
///
/// Every field covers the same number of sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, TensorField)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier field of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, field: TensorField) -> Result<()> {
        let name = name.into();
        if let Some(sites) = self.sites() {
            if field.len() != sites {
                return Err(ViewError::ShapeMismatch(format!(
                    "field '{}' has {} sites, the set has {}",
                    name,
                    field.len(),
                    sites
                )));
            }
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = field,
            None => self.entries.push((name, field)),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TensorField> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Names of the rank-0 fields, in insertion order.
    pub fn scalar_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, f)| f.rank() == 0)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TensorField)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of sites each field covers, `None` while the set is empty.
    pub fn sites(&self) -> Option<usize> {
        self.entries.first().map(|(_, f)| f.len())
    }

    /// The same fields restricted to `sites`, in that order.
    pub fn gather(&self, sites: &[usize]) -> FieldSet {
        FieldSet {
            entries: self
                .entries
                .iter()
                .map(|(n, f)| (n.clone(), f.gather(sites)))
                .collect(),
        }
    }
}
