//! Traits for printers and formatters.

use crate::format::{FormatError, FormatOptions};
use crate::ir::Node;

/// Category of printer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterCategory {
    /// Static type syntax (interfaces, type aliases).
    Types,
    /// Runtime validator expressions.
    Validators,
}

/// A printer turning nodes into target-language text.
///
/// Printers are pure: the same node always yields the same text.
///
/// # Implementing Custom Printers
///
/// ```
/// use normalize_codecgen::{Node, Printer, PrinterCategory, register_printer};
///
/// struct NamesOnly;
///
/// impl Printer for NamesOnly {
///     fn name(&self) -> &'static str { "names-only" }
///     fn language(&self) -> &'static str { "text" }
///     fn category(&self) -> PrinterCategory { PrinterCategory::Types }
///     fn print_raw(&self, node: Node<'_>) -> String {
///         match node {
///             Node::Declaration(d) => d.name.clone(),
///             Node::CustomDeclaration(d) => d.name.clone(),
///             Node::Type(_) => String::new(),
///         }
///     }
/// }
///
/// static NAMES_ONLY: NamesOnly = NamesOnly;
/// register_printer(&NAMES_ONLY);
/// ```
pub trait Printer: Send + Sync {
    /// Unique printer identifier (e.g., "static", "runtime").
    fn name(&self) -> &'static str;

    /// Target language (e.g., "typescript").
    fn language(&self) -> &'static str;

    fn category(&self) -> PrinterCategory;

    /// Render a node without formatting.
    fn print_raw(&self, node: Node<'_>) -> String;

    /// Render a node and reflow it with `formatter`.
    fn print(
        &self,
        node: Node<'_>,
        formatter: &dyn Formatter,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        formatter.format(&self.print_raw(node), options)
    }
}

/// Reflows raw printer output into canonical style.
pub trait Formatter: Send + Sync {
    fn format(&self, source: &str, options: &FormatOptions) -> Result<String, FormatError>;
}
