//! Comparison policy.

use crate::deep_equal::value::{Reflect, Type};
use crate::errors::ExError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default number of decimal digits floats are formatted with before comparing.
pub const DEFAULT_FLOAT_PRECISION: usize = 10;

/// Options for one comparison.
///
/// | field | default |
/// |---|---|
/// | `float_precision` | 10 |
/// | `nil_slices_are_empty` | `true` |
/// | `nil_maps_are_empty` | `true` |
/// | `exclude_unexported_fields` | `false` |
/// | `excluded_types` | empty |
/// | `excluded_field_paths` | empty |
///
/// Field path patterns are validated when a comparison starts, see
/// [`FieldPattern`](crate::deep_equal::FieldPattern) for the grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Decimal digits used to format floats before comparing them as text
    pub float_precision: usize,
    /// Treat a nil slice (`None::<Vec<_>>`) as equal to an empty one
    pub nil_slices_are_empty: bool,
    /// Treat a nil map as equal to an empty one
    pub nil_maps_are_empty: bool,
    /// Skip fields not marked `pub` in `reflect_struct!`
    pub exclude_unexported_fields: bool,
    /// Struct fields of these exact types are never compared
    #[serde(skip)]
    pub excluded_types: BTreeSet<Type>,
    /// Path patterns of fields, keys or indices that are never compared
    pub excluded_field_paths: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            float_precision: DEFAULT_FLOAT_PRECISION,
            nil_slices_are_empty: true,
            nil_maps_are_empty: true,
            exclude_unexported_fields: false,
            excluded_types: BTreeSet::new(),
            excluded_field_paths: Vec::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document is not valid TOML, has unknown keys,
    /// or has values of the wrong type.
    pub fn from_toml_str(toml_text: &str) -> Result<Self, ExError> {
        Ok(toml::from_str(toml_text)?)
    }

    pub fn float_precision(mut self, digits: usize) -> Self {
        self.float_precision = digits;
        self
    }

    pub fn nil_slices_are_empty(mut self, enabled: bool) -> Self {
        self.nil_slices_are_empty = enabled;
        self
    }

    pub fn nil_maps_are_empty(mut self, enabled: bool) -> Self {
        self.nil_maps_are_empty = enabled;
        self
    }

    pub fn exclude_unexported_fields(mut self, enabled: bool) -> Self {
        self.exclude_unexported_fields = enabled;
        self
    }

    pub fn exclude_type<T: Reflect>(mut self) -> Self {
        self.excluded_types.insert(T::static_type());
        self
    }

    pub fn exclude_field_path(mut self, pattern: impl Into<String>) -> Self {
        self.excluded_field_paths.push(pattern.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.float_precision, 10);
        assert!(options.nil_slices_are_empty);
        assert!(options.nil_maps_are_empty);
        assert!(!options.exclude_unexported_fields);
        assert!(options.excluded_types.is_empty());
        assert!(options.excluded_field_paths.is_empty());
    }

    #[test]
    fn test_later_values_override_earlier_ones() {
        let options = Options::new()
            .float_precision(2)
            .float_precision(4)
            .nil_slices_are_empty(false)
            .nil_slices_are_empty(true);
        assert_eq!(options.float_precision, 4);
        assert!(options.nil_slices_are_empty);
    }

    #[test]
    fn test_from_toml_keeps_defaults_for_missing_keys() {
        let options = Options::from_toml_str(
            r#"
            float_precision = 3
            excluded_field_paths = [".created_at"]
            "#,
        )
        .unwrap();
        assert_eq!(options.float_precision, 3);
        assert!(options.nil_maps_are_empty);
        assert_eq!(options.excluded_field_paths, vec![".created_at".to_string()]);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = Options::from_toml_str("float_digits = 3").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.code(), "ERR_INVALID_CONFIG");
    }

    #[test]
    fn test_from_toml_rejects_negative_precision() {
        let err = Options::from_toml_str("float_precision = -1").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }
}
