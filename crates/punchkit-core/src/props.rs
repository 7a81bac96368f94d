//! Typed configuration lookups.
//!
//! Operation parameters arrive from the host as a string-keyed property
//! tree (`"SafeLevel.ReferenceType"`, `"Punching.Pattern"`, ...).
//! `PropertyTree` wraps a JSON document and provides the typed accessors
//! the pipeline needs. Dotted keys are resolved against a literal key
//! first and then as a nested path, so both flat and structured host
//! documents work.

use serde_json::Value;

use crate::error::{Error, Result};

/// String-keyed, typed configuration values for one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTree {
    root: Value,
}

impl PropertyTree {
    /// Wraps an already-parsed JSON document.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| Error::config("<root>", e.to_string()))?;
        Ok(Self { root })
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(v) = self.root.get(key) {
            return Some(v);
        }
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    fn require(&self, key: &str) -> Result<&Value> {
        self.lookup(key)
            .ok_or_else(|| Error::config(key, "missing required value"))
    }

    /// Required floating-point value.
    pub fn flt(&self, key: &str) -> Result<f64> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| Error::config(key, "expected a number"))
    }

    /// Required integer value.
    pub fn int(&self, key: &str) -> Result<i64> {
        self.require(key)?
            .as_i64()
            .ok_or_else(|| Error::config(key, "expected an integer"))
    }

    /// Required boolean value.
    pub fn boolean(&self, key: &str) -> Result<bool> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| Error::config(key, "expected a boolean"))
    }

    /// Boolean with a default for an absent key; a present key of the
    /// wrong type is still an error.
    pub fn boolean_or(&self, key: &str, default: bool) -> Result<bool> {
        match self.lookup(key) {
            None => Ok(default),
            Some(v) => v
                .as_bool()
                .ok_or_else(|| Error::config(key, "expected a boolean")),
        }
    }

    /// Required string value.
    pub fn string(&self, key: &str) -> Result<&str> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| Error::config(key, "expected a string"))
    }

    /// Required nested subtree, e.g. the `"Punching"` pattern block.
    pub fn subtree(&self, key: &str) -> Result<PropertyTree> {
        let value = self.require(key)?;
        if !value.is_object() {
            return Err(Error::config(key, "expected a nested object"));
        }
        Ok(PropertyTree {
            root: value.clone(),
        })
    }
}
