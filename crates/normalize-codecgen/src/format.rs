//! Formatting of printer output.
//!
//! Printers emit compact, unformatted text. A [`Formatter`] reflows it into
//! canonical style; [`BasicFormatter`] is the built-in implementation backed
//! by `dprint-plugin-typescript`.

use crate::traits::Formatter;
use dprint_plugin_typescript::configuration::{
    Configuration, ConfigurationBuilder, QuoteStyle as DprintQuoteStyle, SemiColons,
};
use dprint_plugin_typescript::{FormatTextOptions, format_text};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// Target syntax dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    TypeScript,
    /// Plain JavaScript; type annotations are rejected.
    JavaScript,
}

impl Dialect {
    /// File name the formatter infers the media type from.
    fn file_name(self) -> &'static str {
        match self {
            Dialect::TypeScript => "generated.ts",
            Dialect::JavaScript => "generated.js",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

/// Formatting configuration, always passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub dialect: Dialect,
    /// Terminate statements and interface members with `;`.
    pub use_semicolons: bool,
    pub quote_style: QuoteStyle,
    /// Line width the formatter tries to stay within.
    pub print_width: u32,
    /// Number of spaces for each indentation level.
    pub indent_width: u8,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::TypeScript,
            use_semicolons: false,
            quote_style: QuoteStyle::Single,
            print_width: 80,
            indent_width: 2,
        }
    }
}

impl FormatOptions {
    fn configuration(&self) -> Configuration {
        ConfigurationBuilder::new()
            .line_width(self.print_width)
            .indent_width(self.indent_width)
            .use_tabs(false)
            .quote_style(match self.quote_style {
                QuoteStyle::Single => DprintQuoteStyle::AlwaysSingle,
                QuoteStyle::Double => DprintQuoteStyle::AlwaysDouble,
            })
            .semi_colons(if self.use_semicolons {
                SemiColons::Always
            } else {
                SemiColons::Asi
            })
            .build()
    }
}

/// Error raised when raw text cannot be formatted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The text does not parse in the configured dialect.
    #[error("failed to format generated source: {message}")]
    Syntax { message: String },
}

/// The built-in formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFormatter;

impl Formatter for BasicFormatter {
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError> {
        let config = options.configuration();
        let formatted = format_text(FormatTextOptions {
            path: Path::new(options.dialect.file_name()),
            extension: None,
            text: source.to_string(),
            config: &config,
            external_formatter: None,
        })
        .map_err(|err| FormatError::Syntax {
            message: err.to_string(),
        })?;
        trace!(
            dialect = ?options.dialect,
            bytes = source.len(),
            changed = formatted.is_some(),
            "formatted"
        );
        // `None` means the source is already formatted
        Ok(formatted.unwrap_or_else(|| source.to_string()))
    }
}
