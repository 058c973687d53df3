use serde::{Deserialize, Serialize};

/// An optional request parameter that was present on an incoming request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    name: String,
    value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<(&str, &str)> for Param {
    fn from((name, value): (&str, &str)) -> Self {
        Self::new(name, value)
    }
}
