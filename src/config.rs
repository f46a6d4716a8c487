//! TOML configuration file
//!
//! ```toml
//! [layout]
//! font = "Helvetica"
//! font_size = 11
//! field_width = 160
//!
//! [clipboard]
//! paste_script = "/Library/Scripts/PasteSnippet.applescript"
//! ```
//!
//! Every key is optional and falls back to the built-in default.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::clipboard::ClipboardConfig;
use crate::layout::LayoutConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnippetConfig {
    pub layout: LayoutConfig,
    pub clipboard: ClipboardConfig,
}

impl SnippetConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Justification;
    use std::path::PathBuf;

    #[test]
    fn test_empty_config_is_default() {
        let config = SnippetConfig::from_str("").unwrap();
        assert_eq!(config, SnippetConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = SnippetConfig::from_str(
            r#"
[layout]
font = "Helvetica"
field_width = 160
justification = 1

[clipboard]
paste_script = "/tmp/Paste.applescript"
"#,
        )
        .unwrap();
        assert_eq!(config.layout.font, "Helvetica");
        assert_eq!(config.layout.field_width, 160);
        assert_eq!(config.layout.font_size, 12);
        assert_eq!(config.layout.justification, Justification::Left);
        assert_eq!(config.clipboard.paste_script, PathBuf::from("/tmp/Paste.applescript"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = SnippetConfig::from_str("layout = {{{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SnippetConfig::from_file(Path::new("/nonexistent/fmsnippet.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
