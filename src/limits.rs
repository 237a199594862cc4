//! Limits on raw build input
//!
//! Raw report data often arrives from outside the process. These limits
//! bound how deeply nested and how large that data may be before the
//! registry attempts to build elements from it.

use crate::error::{Error, Result};
use serde_json::Value;

/// Global limits configuration
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum nesting depth of objects and arrays
    pub max_input_depth: usize,

    /// Maximum number of members in any array or object
    pub max_collection_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_depth: 64,
            max_collection_size: 100_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_input_depth: 16,
            max_collection_size: 10_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_input_depth: 1024,
            max_collection_size: 10_000_000,
        }
    }

    /// Check if input depth is within limits
    pub fn check_input_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_input_depth {
            Err(Error::LimitExceeded(format!(
                "input depth {} exceeds maximum {}",
                depth, self.max_input_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a collection size is within limits
    pub fn check_collection_size(&self, size: usize) -> Result<()> {
        if size > self.max_collection_size {
            Err(Error::LimitExceeded(format!(
                "collection of {} members exceeds maximum {}",
                size, self.max_collection_size
            )))
        } else {
            Ok(())
        }
    }

    /// Walk raw input and check every nesting level and collection
    pub fn check_input(&self, value: &Value) -> Result<()> {
        self.check_value(value, 1)
    }

    fn check_value(&self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::Array(items) => {
                self.check_input_depth(depth)?;
                self.check_collection_size(items.len())?;
                items
                    .iter()
                    .try_for_each(|item| self.check_value(item, depth + 1))
            }
            Value::Object(map) => {
                self.check_input_depth(depth)?;
                self.check_collection_size(map.len())?;
                map.values()
                    .try_for_each(|item| self.check_value(item, depth + 1))
            }
            _ => Ok(()),
        }
    }
}
