//! The fish record.

use serde::{Deserialize, Serialize};

/// A single catalog record.
///
/// Every field is optional on input. The `id` is always overwritten by the
/// store on insert. Empty strings and zero lengths are left out of the JSON
/// output, the same as absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fish {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Common name.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    /// Habitat, e.g. "river" or "reef".
    #[serde(default, skip_serializing_if = "is_blank")]
    pub environment: Option<String>,
    /// Maximum length in centimetres.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_length: Option<i64>,
}

impl Fish {
    /// Create a candidate record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the environment.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Set the maximum length.
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

fn is_zero(value: &Option<i64>) -> bool {
    value.is_none_or(|v| v == 0)
}
