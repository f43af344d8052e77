//! Runtime validator printer.
//!
//! Emits validator-combinator expressions (`t.interface(...)`, `t.union(...)`)
//! that accept exactly the values the static types describe.

use super::{escape_property_key, escape_string, write_description, write_literal};
use crate::ir::{
    CustomTypeDeclaration, InterfaceCombinator, Node, Property, RecursiveCombinator,
    TypeDeclaration, TypeReference,
};
use crate::traits::{Printer, PrinterCategory};

/// Static instance of the runtime printer for the registry.
pub static RUNTIME_PRINTER: RuntimePrinter = RuntimePrinter;

/// Runtime validator printer implementing the [`Printer`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimePrinter;

impl Printer for RuntimePrinter {
    fn name(&self) -> &'static str {
        "runtime"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn category(&self) -> PrinterCategory {
        PrinterCategory::Validators
    }

    fn print_raw(&self, node: Node<'_>) -> String {
        ValidatorWriter::emit(node)
    }
}

/// Render a node as an unformatted runtime validator expression.
pub fn print_runtime_raw<'a>(node: impl Into<Node<'a>>) -> String {
    ValidatorWriter::emit(node)
}

/// Whether a type already admits `undefined`, looking through nested unions.
fn contains_undefined(ty: &TypeReference) -> bool {
    match ty {
        TypeReference::Undefined => true,
        TypeReference::Union(c) => c.types.iter().any(contains_undefined),
        _ => false,
    }
}

/// Emits nodes as runtime validator expressions.
#[derive(Debug, Default)]
pub struct ValidatorWriter {
    output: String,
}

impl ValidatorWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit<'a>(node: impl Into<Node<'a>>) -> String {
        let mut writer = Self::new();
        match node.into() {
            Node::Type(ty) => writer.write_type(ty),
            Node::Declaration(decl) => writer.write_declaration(decl),
            Node::CustomDeclaration(decl) => writer.write_custom_declaration(decl),
        }
        writer.output
    }

    fn write_declaration(&mut self, decl: &TypeDeclaration) {
        if decl.is_exported {
            self.output.push_str("export ");
        }
        self.output.push_str("const ");
        self.output.push_str(&decl.name);
        self.output.push_str(" = ");
        if decl.is_readonly {
            self.output.push_str("t.readonly(");
            self.write_type(&decl.ty);
            self.output.push(')');
        } else {
            self.write_type(&decl.ty);
        }
    }

    fn write_custom_declaration(&mut self, decl: &CustomTypeDeclaration) {
        self.output.push_str(&decl.runtime_text);
    }

    fn write_type(&mut self, ty: &TypeReference) {
        match ty {
            TypeReference::Identifier(id) => self.output.push_str(&id.name),

            TypeReference::String
            | TypeReference::Number
            | TypeReference::Integer
            | TypeReference::Boolean
            | TypeReference::Null
            | TypeReference::Undefined
            | TypeReference::Any
            | TypeReference::AnyArray
            | TypeReference::AnyDictionary
            | TypeReference::Object
            | TypeReference::Function => {
                if let Some(name) = ty.primitive_name() {
                    self.output.push_str("t.");
                    self.output.push_str(name);
                }
            }

            TypeReference::Literal(c) => {
                self.output.push_str("t.literal(");
                write_literal(&mut self.output, &c.value);
                self.close_call(c.name.as_deref());
            }

            TypeReference::Interface(c) => self.write_object("interface", c, true),
            TypeReference::Strict(c) => self.write_object("strict", c, true),
            // `t.partial` already accepts missing keys
            TypeReference::Partial(c) => self.write_object("partial", c, false),

            TypeReference::Union(c) => self.write_members("union", &c.types, c.name.as_deref()),
            TypeReference::Intersection(c) => {
                self.write_members("intersection", &c.types, c.name.as_deref())
            }
            TypeReference::Tuple(c) => self.write_members("tuple", &c.types, c.name.as_deref()),

            TypeReference::TaggedUnion(c) => {
                self.output.push_str("t.taggedUnion(");
                self.output.push_str(&escape_string(&c.tag));
                self.output.push_str(", ");
                self.write_list(&c.types);
                self.close_call(c.name.as_deref());
            }

            TypeReference::Keyof(c) => {
                self.output.push_str("t.keyof({");
                for (i, value) in c.values.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.output.push_str(&escape_property_key(value));
                    self.output.push_str(": true");
                }
                self.output.push('}');
                self.close_call(c.name.as_deref());
            }

            TypeReference::Array(c) => self.write_wrapped("array", &c.ty, c.name.as_deref()),
            TypeReference::ReadonlyArray(c) => {
                self.write_wrapped("readonlyArray", &c.ty, c.name.as_deref())
            }
            TypeReference::Exact(c) => self.write_wrapped("exact", &c.ty, c.name.as_deref()),

            TypeReference::Dictionary(c) => {
                self.output.push_str("t.dictionary(");
                self.write_type(&c.domain);
                self.output.push_str(", ");
                self.write_type(&c.codomain);
                self.close_call(c.name.as_deref());
            }

            TypeReference::Recursive(c) => self.write_recursive(c),

            TypeReference::Custom(c) => self.output.push_str(&c.runtime_text),
        }
    }

    /// `t.recursive<P>('name', (name: t.Any) => T)`: identifiers inside `T`
    /// named after the declaration resolve to the bound parameter.
    fn write_recursive(&mut self, c: &RecursiveCombinator) {
        self.output.push_str("t.recursive<");
        self.output.push_str(&c.type_parameter.name);
        self.output.push_str(">(");
        self.output.push_str(&escape_string(&c.name));
        self.output.push_str(", (");
        self.output.push_str(&c.name);
        self.output.push_str(": t.Any) => ");
        self.write_type(&c.ty);
        self.output.push(')');
    }

    fn write_object(&mut self, combinator: &str, c: &InterfaceCombinator, widen_optional: bool) {
        self.output.push_str("t.");
        self.output.push_str(combinator);
        self.output.push_str("({");
        for (i, property) in c.properties.iter().enumerate() {
            if i > 0 {
                self.output.push_str(",\n");
            }
            self.write_property(property, widen_optional);
        }
        self.output.push('}');
        self.close_call(c.name.as_deref());
    }

    fn write_property(&mut self, property: &Property, widen_optional: bool) {
        write_description(&mut self.output, property.description.as_deref());
        self.output.push_str(&escape_property_key(&property.key));
        self.output.push_str(": ");
        if widen_optional && property.is_optional && !contains_undefined(&property.ty) {
            self.output.push_str("t.union([");
            self.write_type(&property.ty);
            self.output.push_str(",t.undefined])");
        } else {
            self.write_type(&property.ty);
        }
    }

    fn write_members(&mut self, combinator: &str, types: &[TypeReference], name: Option<&str>) {
        self.output.push_str("t.");
        self.output.push_str(combinator);
        self.output.push('(');
        self.write_list(types);
        self.close_call(name);
    }

    fn write_wrapped(&mut self, combinator: &str, ty: &TypeReference, name: Option<&str>) {
        self.output.push_str("t.");
        self.output.push_str(combinator);
        self.output.push('(');
        self.write_type(ty);
        self.close_call(name);
    }

    fn write_list(&mut self, types: &[TypeReference]) {
        self.output.push('[');
        for (i, member) in types.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_type(member);
        }
        self.output.push(']');
    }

    /// Append the optional introspection name and close the call.
    fn close_call(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            self.output.push_str(", ");
            self.output.push_str(&escape_string(name));
        }
        self.output.push(')');
    }
}
