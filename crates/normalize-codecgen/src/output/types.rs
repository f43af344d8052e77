//! Static type printer.
//!
//! Emits TypeScript type syntax: interfaces, type aliases, unions, tuples.

use super::{escape_property_key, write_description, write_literal};
use crate::format::{FormatError, FormatOptions};
use crate::ir::{
    CustomTypeDeclaration, InterfaceCombinator, LiteralValue, Node, Property, TypeDeclaration,
    TypeReference,
};
use crate::traits::{Formatter, Printer, PrinterCategory};

/// Static instance of the static type printer for the registry.
pub static STATIC_PRINTER: StaticPrinter = StaticPrinter;

/// Static type printer implementing the [`Printer`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPrinter;

impl Printer for StaticPrinter {
    fn name(&self) -> &'static str {
        "static"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn category(&self) -> PrinterCategory {
        PrinterCategory::Types
    }

    fn print_raw(&self, node: Node<'_>) -> String {
        TypeWriter::emit(node)
    }

    fn print(
        &self,
        node: Node<'_>,
        formatter: &dyn Formatter,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        let raw = TypeWriter::emit(node);
        match node {
            Node::Type(_) => format_fragment(&raw, formatter, options),
            Node::Declaration(_) | Node::CustomDeclaration(_) => formatter.format(&raw, options),
        }
    }
}

/// Alias a bare type is formatted under. A type on its own is not a
/// statement, so it cannot be formatted directly.
const FRAGMENT_ALIAS: &str = "type Fragment =";

/// Format a bare type by wrapping it in [`FRAGMENT_ALIAS`] and unwrapping
/// the result.
fn format_fragment(
    raw: &str,
    formatter: &dyn Formatter,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let formatted = formatter.format(&format!("{FRAGMENT_ALIAS} {raw}"), options)?;
    let body = formatted.strip_prefix(FRAGMENT_ALIAS).unwrap_or(formatted.as_str());
    let body = body.trim_end().trim_end_matches(';');

    let mut output = String::with_capacity(body.len() + 1);
    match body.strip_prefix('\n') {
        // Broken after `=`: every line carries one extra indentation level
        Some(hanging) => {
            let indent = " ".repeat(usize::from(options.indent_width));
            for (i, line) in hanging.lines().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                output.push_str(line.strip_prefix(indent.as_str()).unwrap_or(line));
            }
        }
        None => output.push_str(body.trim_start()),
    }
    output.push('\n');
    Ok(output)
}

/// Render a node as unformatted static type syntax.
pub fn print_static_raw<'a>(node: impl Into<Node<'a>>) -> String {
    TypeWriter::emit(node)
}

/// Emits nodes as TypeScript type syntax.
#[derive(Debug, Default)]
pub struct TypeWriter {
    output: String,
}

impl TypeWriter {
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
        if decl.ty.is_object_like() && !decl.is_readonly {
            self.output.push_str("interface ");
            self.output.push_str(&decl.name);
            self.output.push(' ');
            self.write_type(&decl.ty);
        } else {
            self.output.push_str("type ");
            self.output.push_str(&decl.name);
            self.output.push_str(" = ");
            if decl.is_readonly {
                self.output.push_str("Readonly<");
                self.write_type(&decl.ty);
                self.output.push('>');
            } else {
                self.write_type(&decl.ty);
            }
        }
    }

    fn write_custom_declaration(&mut self, decl: &CustomTypeDeclaration) {
        self.output.push_str(&decl.static_text);
    }

    fn write_type(&mut self, ty: &TypeReference) {
        match ty {
            TypeReference::Identifier(id) => self.output.push_str(&id.name),

            TypeReference::String => self.output.push_str("string"),
            TypeReference::Number | TypeReference::Integer => self.output.push_str("number"),
            TypeReference::Boolean => self.output.push_str("boolean"),
            TypeReference::Null => self.output.push_str("null"),
            TypeReference::Undefined => self.output.push_str("undefined"),
            TypeReference::Any => self.output.push_str("any"),
            TypeReference::AnyArray => self.output.push_str("Array<t.mixed>"),
            TypeReference::AnyDictionary => self.output.push_str("{ [key: string]: t.mixed }"),
            TypeReference::Object => self.output.push_str("object"),
            TypeReference::Function => self.output.push_str("Function"),

            TypeReference::Literal(c) => write_literal(&mut self.output, &c.value),

            TypeReference::Interface(c) | TypeReference::Strict(c) => self.write_object(c, false),
            TypeReference::Partial(c) => self.write_object(c, true),

            TypeReference::Union(c) => self.write_members(&c.types, '|', "never"),
            TypeReference::TaggedUnion(c) => self.write_members(&c.types, '|', "never"),
            TypeReference::Intersection(c) => self.write_members(&c.types, '&', "unknown"),

            TypeReference::Keyof(c) => {
                let literals: Vec<TypeReference> = c
                    .values
                    .iter()
                    .map(|v| TypeReference::literal(LiteralValue::String(v.clone())))
                    .collect();
                self.write_members(&literals, '|', "never");
            }

            TypeReference::Array(c) => {
                self.output.push_str("Array<");
                self.write_type(&c.ty);
                self.output.push('>');
            }

            TypeReference::ReadonlyArray(c) => {
                self.output.push_str("ReadonlyArray<");
                self.write_type(&c.ty);
                self.output.push('>');
            }

            TypeReference::Tuple(c) => {
                self.output.push('[');
                for (i, member) in c.types.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_type(member);
                }
                self.output.push(']');
            }

            TypeReference::Dictionary(c) => {
                self.output.push_str("{ [key: ");
                self.write_type(&c.domain);
                self.output.push_str("]: ");
                self.write_type(&c.codomain);
                self.output.push_str(" }");
            }

            // The target language resolves self-references on its own
            TypeReference::Recursive(c) => self.write_type(&c.ty),
            TypeReference::Exact(c) => self.write_type(&c.ty),

            TypeReference::Custom(c) => self.output.push_str(&c.static_text),
        }
    }

    fn write_object(&mut self, c: &InterfaceCombinator, force_optional: bool) {
        self.output.push('{');
        for (i, property) in c.properties.iter().enumerate() {
            if i > 0 {
                self.output.push_str(",\n");
            }
            self.write_property(property, force_optional);
        }
        self.output.push('}');
    }

    fn write_property(&mut self, property: &Property, force_optional: bool) {
        write_description(&mut self.output, property.description.as_deref());
        self.output.push_str(&escape_property_key(&property.key));
        if force_optional || property.is_optional {
            self.output.push('?');
        }
        self.output.push_str(": ");
        self.write_type(&property.ty);
    }

    /// Leading-separator list: `| A | B`.
    fn write_members(&mut self, types: &[TypeReference], separator: char, empty: &str) {
        if types.is_empty() {
            self.output.push_str(empty);
            return;
        }
        for (i, member) in types.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.output.push(separator);
            self.output.push(' ');
            if leads_with_operator(member) {
                self.output.push('(');
                self.write_type(member);
                self.output.push(')');
            } else {
                self.write_type(member);
            }
        }
    }
}

/// Whether a type prints as a leading-separator list. Such a type must be
/// parenthesized inside another list or its members merge into the outer one.
fn leads_with_operator(ty: &TypeReference) -> bool {
    match ty {
        TypeReference::Union(c) | TypeReference::Intersection(c) => !c.types.is_empty(),
        TypeReference::TaggedUnion(c) => !c.types.is_empty(),
        TypeReference::Keyof(c) => !c.values.is_empty(),
        TypeReference::Recursive(c) => leads_with_operator(&c.ty),
        TypeReference::Exact(c) => leads_with_operator(&c.ty),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Identifier;

    fn decl(ty: TypeReference) -> TypeDeclaration {
        TypeDeclaration::new("Foo", ty)
    }

    #[test]
    fn primitives() {
        let cases = [
            (TypeReference::String, "type Foo = string"),
            (TypeReference::Number, "type Foo = number"),
            (TypeReference::Integer, "type Foo = number"),
            (TypeReference::Boolean, "type Foo = boolean"),
            (TypeReference::Null, "type Foo = null"),
            (TypeReference::Undefined, "type Foo = undefined"),
            (TypeReference::Any, "type Foo = any"),
            (TypeReference::AnyArray, "type Foo = Array<t.mixed>"),
            (
                TypeReference::AnyDictionary,
                "type Foo = { [key: string]: t.mixed }",
            ),
            (TypeReference::Object, "type Foo = object"),
            (TypeReference::Function, "type Foo = Function"),
        ];
        for (ty, expected) in cases {
            assert_eq!(print_static_raw(&decl(ty)), expected);
        }
    }

    #[test]
    fn interface_declaration() {
        let ty = TypeReference::interface(vec![
            Property::required("foo", TypeReference::String).with_description("description1"),
            Property::optional("bar", TypeReference::Number),
        ]);
        assert_eq!(
            print_static_raw(&decl(ty)),
            "interface Foo {/** description1 */\nfoo: string,\nbar?: number}"
        );
    }

    #[test]
    fn partial_forces_optional() {
        let ty = TypeReference::partial(vec![
            Property::required("foo", TypeReference::String),
            Property::optional("bar", TypeReference::Number),
        ]);
        assert_eq!(
            print_static_raw(&ty),
            "{foo?: string,\nbar?: number}"
        );
    }

    #[test]
    fn readonly_and_exported() {
        let ty = TypeReference::interface(vec![Property::required("foo", TypeReference::String)])
            .with_name("Foo");
        assert_eq!(
            print_static_raw(&decl(ty.clone()).exported()),
            "export interface Foo {foo: string}"
        );
        assert_eq!(
            print_static_raw(&decl(ty).exported().readonly()),
            "export type Foo = Readonly<{foo: string}>"
        );
    }

    #[test]
    fn unions_and_intersections() {
        let union = TypeReference::union(vec![TypeReference::String, TypeReference::Null]);
        assert_eq!(print_static_raw(&union), "| string | null");

        let intersection = TypeReference::intersection(vec![
            TypeReference::identifier("A"),
            TypeReference::identifier("B"),
        ]);
        assert_eq!(print_static_raw(&intersection), "& A & B");

        let tagged = TypeReference::tagged_union(
            "type",
            vec![
                TypeReference::interface(vec![Property::required(
                    "type",
                    TypeReference::literal("A"),
                )]),
                TypeReference::interface(vec![Property::required(
                    "type",
                    TypeReference::literal("B"),
                )]),
            ],
        );
        assert_eq!(print_static_raw(&tagged), "| {type: 'A'} | {type: 'B'}");
    }

    #[test]
    fn nested_lists_are_parenthesized() {
        let a = TypeReference::identifier("A");
        let b = TypeReference::identifier("B");
        let c = TypeReference::identifier("C");

        let union_in_intersection = TypeReference::intersection(vec![
            TypeReference::union(vec![a.clone(), b.clone()]),
            c.clone(),
        ]);
        assert_eq!(
            print_static_raw(&TypeDeclaration::new("X", union_in_intersection)),
            "type X = & (| A | B) & C"
        );

        let intersection_in_union = TypeReference::union(vec![
            TypeReference::intersection(vec![a.clone(), b]),
            TypeReference::keyof(["k"]),
            TypeReference::exact(TypeReference::union(vec![c])),
            TypeReference::union(vec![]),
        ]);
        assert_eq!(
            print_static_raw(&intersection_in_union),
            "| (& A & B) | (| 'k') | (| C) | never"
        );

        let nested_in_array = TypeReference::array(TypeReference::union(vec![a]));
        assert_eq!(print_static_raw(&nested_in_array), "Array<| A>");
    }

    #[test]
    fn empty_members() {
        assert_eq!(print_static_raw(&TypeReference::union(vec![])), "never");
        assert_eq!(print_static_raw(&TypeReference::keyof(Vec::<String>::new())), "never");
        assert_eq!(print_static_raw(&TypeReference::intersection(vec![])), "unknown");
    }

    #[test]
    fn keyof_is_a_union_of_literals() {
        let ty = TypeReference::keyof(["a", "b"]);
        insta::assert_snapshot!(print_static_raw(&ty), @"| 'a' | 'b'");
    }

    #[test]
    fn containers() {
        let ty = TypeReference::tuple(vec![
            TypeReference::array(TypeReference::String),
            TypeReference::readonly_array(TypeReference::identifier("Foo")),
            TypeReference::dictionary(TypeReference::String, TypeReference::Number),
        ]);
        assert_eq!(
            print_static_raw(&ty),
            "[Array<string>,ReadonlyArray<Foo>,{ [key: string]: number }]"
        );
    }

    #[test]
    fn literals() {
        assert_eq!(print_static_raw(&TypeReference::literal("it's")), r"'it\'s'");
        assert_eq!(print_static_raw(&TypeReference::literal(42)), "42");
        assert_eq!(print_static_raw(&TypeReference::literal(false)), "false");
    }

    #[test]
    fn recursive_prints_inner_type() {
        let ty = TypeReference::recursive(
            Identifier::new("Category"),
            "Category",
            TypeReference::interface(vec![
                Property::required("name", TypeReference::String),
                Property::required(
                    "categories",
                    TypeReference::array(TypeReference::identifier("Category")),
                ),
            ]),
        );
        assert_eq!(
            print_static_raw(&TypeDeclaration::new("Category", ty)),
            "type Category = {name: string,\ncategories: Array<Category>}"
        );
    }

    #[test]
    fn escaped_keys() {
        let ty = TypeReference::interface(vec![
            Property::required("foo bar", TypeReference::String),
            Property::required("image/jpeg", TypeReference::String),
        ]);
        assert_eq!(
            print_static_raw(&ty),
            "{'foo bar': string,\n'image/jpeg': string}"
        );
    }

    #[test]
    fn custom_text_is_verbatim() {
        let ty = TypeReference::custom("Option<string>", "createOptionFromNullable(t.string)", vec![]);
        assert_eq!(print_static_raw(&decl(ty)), "type Foo = Option<string>");

        let custom = CustomTypeDeclaration::new(
            "UserId",
            "export interface UserId extends Newtype<'UserId', string> {}",
            "export const UserId = fromNewtype<UserId>(t.string)",
        );
        assert_eq!(
            print_static_raw(&custom),
            "export interface UserId extends Newtype<'UserId', string> {}"
        );
    }

    /// Hands back canned output for a wrapped fragment.
    struct Canned(&'static str);

    impl Formatter for Canned {
        fn format(&self, source: &str, _: &FormatOptions) -> Result<String, FormatError> {
            assert!(source.starts_with("type Fragment = "), "{source}");
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn fragments_are_unwrapped() {
        let ty = Node::Type(&TypeReference::String);
        let options = FormatOptions::default();
        let print = |canned| STATIC_PRINTER.print(ty, &Canned(canned), &options).unwrap();

        assert_eq!(print("type Fragment = string\n"), "string\n");
        assert_eq!(print("type Fragment = string;\n"), "string\n");
        assert_eq!(
            print("type Fragment = {\n  foo: string\n}\n"),
            "{\n  foo: string\n}\n"
        );
        assert_eq!(
            print("type Fragment =\n  | 'a'\n  | {\n    b: string\n  };\n"),
            "| 'a'\n| {\n  b: string\n}\n"
        );
    }

    #[test]
    fn printer_trait() {
        assert_eq!(STATIC_PRINTER.name(), "static");
        assert_eq!(STATIC_PRINTER.category(), PrinterCategory::Types);
        assert_eq!(
            STATIC_PRINTER.print_raw(Node::Type(&TypeReference::Integer)),
            "number"
        );
    }
}
