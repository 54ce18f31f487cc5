//! Validation configuration for DEX loading
//!
//! This module provides configuration options for the header checks applied when a file is
//! loaded. Structural bounds checks on tables and data items are always performed on access
//! and cannot be switched off.

/// Configuration for header validation during file loading
///
/// Both checks are enabled by default. Disabling them allows inspecting damaged or
/// deliberately tampered files; every violation that is let through is reported with a
/// `warn!` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Reject files whose magic is not `dex\n` + three ASCII digits + `\0`
    pub enable_magic_validation: bool,

    /// Reject files whose header `file_size` differs from the buffer length
    pub enable_file_size_validation: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationConfig {
    /// Creates a disabled validation configuration
    ///
    /// Only the fixed header layout has to be readable; magic and file size are not checked.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_magic_validation: false,
            enable_file_size_validation: false,
        }
    }

    /// Creates a validation configuration with all checks enabled
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enable_magic_validation: true,
            enable_file_size_validation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_config_presets() {
        let disabled = ValidationConfig::disabled();
        assert!(!disabled.enable_magic_validation);
        assert!(!disabled.enable_file_size_validation);

        let strict = ValidationConfig::strict();
        assert!(strict.enable_magic_validation);
        assert!(strict.enable_file_size_validation);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(ValidationConfig::default(), ValidationConfig::strict());
    }
}
