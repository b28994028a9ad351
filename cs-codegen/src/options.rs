/// Emitter options: layout choices honored on every construct.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loader::LoadError;

/// Where the opening brace of a block goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracingStyle {
    /// `if (x) {`
    #[default]
    Block,
    /// `{` on its own line under the header.
    C,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Text written once per indentation level.
    pub indent_string: String,
    pub bracing_style: BracingStyle,
    /// `} else {` on one line instead of `else` starting a new line.
    /// Also applies to `catch` and `finally`.
    pub else_on_closing: bool,
    pub blank_lines_between_members: bool,
    /// Prefix declared and referenced names that are C# keywords with `@`.
    pub escape_identifiers: bool,
    /// Version string written into the generated-file banner.
    pub banner_version: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent_string: "    ".into(),
            bracing_style: BracingStyle::Block,
            else_on_closing: false,
            blank_lines_between_members: true,
            escape_identifiers: false,
            banner_version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(LoadError::Options)
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
