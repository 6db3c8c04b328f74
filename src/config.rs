//! Resolver configuration.

use crate::core::domain::error::ValidationError;

/// Tunables for selector resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Fetch the registered tag list and warn about `@tag-` terms outside it.
    /// Never filters the result.
    pub check_allowed_tags: bool,
    /// Emit a warning when a non-empty selector selects no guests.
    pub warn_on_empty: bool,
    /// Optional input-size guard. When set, selectors longer than this (in bytes)
    /// are rejected before evaluation. Unset by default.
    pub max_selector_length: Option<usize>,
}

impl ResolverConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_selector_length == Some(0) {
            return Err(ValidationError::Field {
                field: "max_selector_length".to_string(),
                message: "Maximum selector length must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            check_allowed_tags: true,
            warn_on_empty: true,
            max_selector_length: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_selector_length, None);
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = ResolverConfig {
            max_selector_length: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::Field { field, .. }) if field == "max_selector_length"
        ));
    }
}
