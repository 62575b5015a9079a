//! Free-form renderer parameters

use heapless::{String, Vec};

/// Maximum parameters per workspace
pub const MAX_PARAMS: usize = 6;

/// Maximum parameter key length
pub const MAX_PARAM_KEY_LEN: usize = 16;

/// Maximum parameter value length
pub const MAX_PARAM_VALUE_LEN: usize = 128;

/// Why a parameter could not be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// All slots are taken
    TooMany,
    /// Key longer than [`MAX_PARAM_KEY_LEN`]
    KeyTooLong,
    /// Value longer than [`MAX_PARAM_VALUE_LEN`]
    ValueTooLong,
}

/// A single key/value parameter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Param {
    pub key: String<MAX_PARAM_KEY_LEN>,
    pub value: String<MAX_PARAM_VALUE_LEN>,
}

/// Ordered string-to-string mapping handed to a renderer
///
/// Values are kept as text; each renderer interprets its own keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Params {
    entries: Vec<Param, MAX_PARAMS>,
}

impl Params {
    /// Create an empty parameter set
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: &str, value: &str) -> Result<(), ParamError> {
        let value: String<MAX_PARAM_VALUE_LEN> =
            String::try_from(value).map_err(|_| ParamError::ValueTooLong)?;

        if let Some(existing) = self.entries.iter_mut().find(|p| p.key == key) {
            existing.value = value;
            return Ok(());
        }

        let key = String::try_from(key).map_err(|_| ParamError::KeyTooLong)?;
        self.entries
            .push(Param { key, value })
            .map_err(|_| ParamError::TooMany)
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut params = Params::new();
        params.insert("title", "Hello").unwrap();
        params.insert("text", "World").unwrap();

        assert_eq!(params.get("title"), Some("Hello"));
        assert_eq!(params.get("text"), Some("World"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut params = Params::new();
        params.insert("title", "First").unwrap();
        params.insert("title", "Second").unwrap();

        assert_eq!(params.get("title"), Some("Second"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_capacity() {
        let mut params = Params::new();
        let keys = ["a", "b", "c", "d", "e", "f"];
        for key in keys {
            params.insert(key, "v").unwrap();
        }
        assert_eq!(params.insert("g", "v"), Err(ParamError::TooMany));
        // Replacing still works when full
        assert!(params.insert("a", "w").is_ok());
    }

    #[test]
    fn test_key_too_long() {
        let mut params = Params::new();
        assert_eq!(
            params.insert("a_very_long_parameter_key", "v"),
            Err(ParamError::KeyTooLong)
        );
    }
}
