//! Named numeric parameters shared by the physics procedures of a system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Ordered map of parameter name to value (e.g. `"plasma h2 excess ratio" -> 1.5`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters {
    values: BTreeMap<String, f64>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of a parameter that must be present.
    pub fn require(&self, name: &str) -> GraphResult<f64> {
        self.get(name).ok_or_else(|| GraphError::MissingParameter {
            name: name.to_string(),
        })
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Multiply an existing parameter by `factor` and return the new value.
    pub fn scale(&mut self, name: &str, factor: f64) -> GraphResult<f64> {
        let value = self
            .values
            .get_mut(name)
            .ok_or_else(|| GraphError::MissingParameter {
                name: name.to_string(),
            })?;
        *value *= factor;
        Ok(*value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Overwrite with every value from `other`.
    pub fn extend_from(&mut self, other: &Parameters) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
