//! Static types and runtime validators from one declaration model.
//!
//! `normalize-codecgen` takes a batch of type declarations and prints each of
//! them twice: as TypeScript type syntax and as an equivalent runtime
//! validator expression, so compile-time and run-time checks cannot drift
//! apart.
//!
//! # Architecture
//!
//! ```text
//! Declarations        Ordering             Printers
//! ────────────     ───────────────     ──────────────────
//!                                   ┌─> static  (output/types.rs)
//! ir.rs ──────> deps.rs + sort.rs ──┤
//!                                   └─> runtime (output/validators.rs)
//!                                              │
//!                                              └─> Formatter (format.rs)
//! ```
//!
//! # Example
//!
//! ```
//! use normalize_codecgen::{
//!     FormatOptions, Property, TypeDeclaration, TypeReference, print_runtime, print_static, sort,
//! };
//!
//! let declarations = sort(vec![
//!     TypeDeclaration::new(
//!         "Person",
//!         TypeReference::interface(vec![
//!             Property::required("name", TypeReference::String),
//!             Property::optional("age", TypeReference::Number),
//!         ]),
//!     )
//!     .into(),
//! ]);
//!
//! let options = FormatOptions::default();
//! let types = print_static(&declarations[0], &options).unwrap();
//! let validators = print_runtime(&declarations[0], &options).unwrap();
//!
//! assert!(types.starts_with("interface Person {\n  name: string"));
//! assert!(types.contains("  age?: number"));
//! assert!(validators.starts_with("const Person = t.interface({"));
//! assert!(validators.contains("age: t.union([t.number, t.undefined])"));
//! ```
//!
//! # Using the Printer Registry
//!
//! ```
//! use normalize_codecgen::{BasicFormatter, FormatOptions, Node, Printer, TypeReference, get_printer};
//!
//! let printer = get_printer("runtime").unwrap();
//! let ty = TypeReference::array(TypeReference::String);
//! let output = printer
//!     .print(Node::Type(&ty), &BasicFormatter, &FormatOptions::default())
//!     .unwrap();
//! assert_eq!(output, "t.array(t.string)\n");
//! ```

pub mod config;
pub mod deps;
pub mod format;
pub mod ir;
pub mod output;
pub mod registry;
pub mod sort;
pub mod traits;

pub use config::{CodegenConfig, ConfigError};
pub use deps::dependencies_of;
pub use format::{BasicFormatter, Dialect, FormatError, FormatOptions, QuoteStyle};
pub use ir::{
    CustomTypeDeclaration, Declaration, Identifier, LiteralValue, Node, Property, TypeDeclaration,
    TypeReference,
};
pub use output::{
    print_runtime, print_runtime_raw, print_runtime_with, print_static, print_static_raw,
    print_static_with,
};
pub use registry::{get_printer, printer_names, printers, printers_by_category, register_printer};
pub use sort::{DeclarationGraph, TopologicalOrder, sort, sort_type_declarations};
pub use traits::{Formatter, Printer, PrinterCategory};
