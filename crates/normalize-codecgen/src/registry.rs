//! Registry for printers.

use crate::traits::{Printer, PrinterCategory};
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};

/// Global registry of printers.
static PRINTERS: RwLock<Vec<&'static dyn Printer>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom printer.
///
/// Built-in printers are registered automatically on first use. A printer
/// registered under an existing name is shadowed by the earlier one in
/// [`get_printer`].
pub fn register_printer(printer: &'static dyn Printer) {
    init_builtin();
    PRINTERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(printer);
}

/// Initialize built-in printers (called automatically on first use).
fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut printers = PRINTERS.write().unwrap_or_else(PoisonError::into_inner);
        printers.push(&crate::output::types::STATIC_PRINTER);
        printers.push(&crate::output::validators::RUNTIME_PRINTER);
    });
}

fn read() -> RwLockReadGuard<'static, Vec<&'static dyn Printer>> {
    init_builtin();
    PRINTERS.read().unwrap_or_else(PoisonError::into_inner)
}

/// Get a printer by name.
pub fn get_printer(name: &str) -> Option<&'static dyn Printer> {
    read().iter().find(|p| p.name() == name).copied()
}

/// Get all printers in a category.
pub fn printers_by_category(category: PrinterCategory) -> Vec<&'static dyn Printer> {
    read()
        .iter()
        .filter(|p| p.category() == category)
        .copied()
        .collect()
}

/// List all registered printers.
pub fn printers() -> Vec<&'static dyn Printer> {
    read().clone()
}

/// List all registered printer names.
pub fn printer_names() -> Vec<&'static str> {
    read().iter().map(|p| p.name()).collect()
}
