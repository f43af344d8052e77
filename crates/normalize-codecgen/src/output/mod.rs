//! Printers for declarations and type references.
//!
//! Both printers walk the same node model: [`types`] renders static
//! TypeScript type syntax, [`validators`] renders the equivalent runtime
//! validator expression. Raw output is unformatted; the `print_*` entry
//! points hand it to a [`Formatter`].

pub mod types;
pub mod validators;

pub use types::{STATIC_PRINTER, StaticPrinter, TypeWriter, print_static_raw};
pub use validators::{RUNTIME_PRINTER, RuntimePrinter, ValidatorWriter, print_runtime_raw};

use crate::format::{BasicFormatter, FormatError, FormatOptions};
use crate::ir::{LiteralValue, Node};
use crate::traits::{Formatter, Printer};

/// Print static type syntax and format it with the built-in formatter.
pub fn print_static<'a>(
    node: impl Into<Node<'a>>,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    print_static_with(node, &BasicFormatter, options)
}

/// Print a runtime validator and format it with the built-in formatter.
pub fn print_runtime<'a>(
    node: impl Into<Node<'a>>,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    print_runtime_with(node, &BasicFormatter, options)
}

pub fn print_static_with<'a>(
    node: impl Into<Node<'a>>,
    formatter: &dyn Formatter,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    STATIC_PRINTER.print(node.into(), formatter, options)
}

pub fn print_runtime_with<'a>(
    node: impl Into<Node<'a>>,
    formatter: &dyn Formatter,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    RUNTIME_PRINTER.print(node.into(), formatter, options)
}

/// Single-quote a string, escaping backslashes, quotes and line breaks.
pub(crate) fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Keys containing whitespace, `/` or `-` cannot be written bare.
fn is_valid_property_key(key: &str) -> bool {
    !key.chars().any(|c| c.is_whitespace() || c == '/' || c == '-')
}

pub(crate) fn escape_property_key(key: &str) -> String {
    if is_valid_property_key(key) {
        key.to_string()
    } else {
        escape_string(key)
    }
}

pub(crate) fn write_description(output: &mut String, description: Option<&str>) {
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        output.push_str("/** ");
        output.push_str(&description.replace("*/", "*\\/"));
        output.push_str(" */\n");
    }
}

pub(crate) fn write_literal(output: &mut String, value: &LiteralValue) {
    match value {
        LiteralValue::String(s) => output.push_str(&escape_string(s)),
        LiteralValue::Number(n) => output.push_str(&format_number(*n)),
        LiteralValue::Boolean(b) => output.push_str(if *b { "true" } else { "false" }),
    }
}

/// Format a number the way the target language prints it.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // Integral: no trailing `.0`
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
