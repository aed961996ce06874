//! Server configuration consumed by the driver annotation settings.
//!
//! The field names follow the server property names, so a configuration
//! document served by the portal backend deserializes directly into
//! [`ServerConfig`]. Missing keys fall back to `false` / absent, which is
//! also what [`ServerConfig::default`] returns before any configuration has
//! been loaded.

use std::io::Read;

use serde::{Deserialize, Serialize};

/// Capability flags, defaults, and menu labels supplied by the server.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(clippy::struct_excessive_bools)]
pub struct ServerConfig {
    /// Whether hotspot annotation is available in this deployment.
    pub show_hotspot: bool,
    /// Whether OncoKB annotation is available in this deployment.
    pub show_oncokb: bool,
    /// Default for honoring the custom binary driver flag.
    pub oncoprint_custom_driver_annotation_binary_default: bool,
    /// Default for newly discovered custom driver tiers.
    pub oncoprint_custom_driver_annotation_tiers_default: bool,
    /// Default for hotspot annotation.
    pub oncoprint_hotspots_default: bool,
    /// Default for OncoKB annotation.
    pub oncoprint_oncokb_default: bool,
    /// Default for hiding variants of unknown significance.
    pub oncoprint_hide_vus_default: bool,
    /// Menu label for the custom binary driver annotation.
    pub oncoprint_custom_driver_annotation_binary_menu_label: Option<String>,
    /// Menu label for the custom tiered driver annotation.
    pub oncoprint_custom_driver_annotation_tiers_menu_label: Option<String>,
}

/// Errors raised while loading a [`ServerConfig`] document.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    /// The document could not be read.
    #[display("failed to read server configuration: {_0}")]
    Io(std::io::Error),
    /// The document is not valid configuration JSON.
    #[display("invalid server configuration: {_0}")]
    Json(serde_json::Error),
}

impl ServerConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the string is not a JSON object
    /// matching the configuration schema.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a configuration from a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if reading fails, or [`ConfigError::Json`]
    /// if the content does not match the configuration schema.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    /// Returns the binary menu label, treating an empty string as absent.
    #[must_use]
    pub fn custom_binary_menu_label(&self) -> Option<&str> {
        self.oncoprint_custom_driver_annotation_binary_menu_label
            .as_deref()
            .filter(|label| !label.is_empty())
    }

    /// Returns the tiers menu label, treating an empty string as absent.
    #[must_use]
    pub fn custom_tiers_menu_label(&self) -> Option<&str> {
        self.oncoprint_custom_driver_annotation_tiers_menu_label
            .as_deref()
            .filter(|label| !label.is_empty())
    }
}
