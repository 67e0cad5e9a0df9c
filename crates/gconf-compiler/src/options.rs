//! Compilation options.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spaces per nesting level in XML output.
pub const DEFAULT_INDENT: usize = 2;

/// Document format produced by the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Options for [`compile_with_options`](crate::compile_with_options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    pub format: OutputFormat,
    /// Indentation width. JSON output always uses two spaces.
    pub indent: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Xml,
            indent: DEFAULT_INDENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.format, OutputFormat::Xml);
        assert_eq!(options.indent, 2);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(
            OutputFormat::from_str("xml", true).unwrap(),
            OutputFormat::Xml
        );
    }
}
