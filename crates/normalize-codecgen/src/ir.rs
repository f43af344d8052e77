//! Node model for type declarations.
//!
//! Schema front-ends build these values and hand a batch of [`Declaration`]s
//! to [`sort`](crate::sort::sort) and the printers. Nodes are plain immutable
//! data: no validation happens at construction time.
//!
//! The serde representation is tagged by `kind` (`"StringType"`,
//! `"InterfaceCombinator"`, `"TypeDeclaration"`, ...) with camelCase fields, so
//! declarations can also be handed over as JSON.

use serde::{Deserialize, Serialize};

/// A named reference to another declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A type reference: primitive, identifier or combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeReference {
    // Primitives
    #[serde(rename = "StringType")]
    String,
    #[serde(rename = "NumberType")]
    Number,
    #[serde(rename = "IntegerType")]
    Integer,
    #[serde(rename = "BooleanType")]
    Boolean,
    #[serde(rename = "NullType")]
    Null,
    #[serde(rename = "UndefinedType")]
    Undefined,
    #[serde(rename = "AnyType")]
    Any,
    #[serde(rename = "AnyArrayType")]
    AnyArray,
    #[serde(rename = "AnyDictionaryType")]
    AnyDictionary,
    #[serde(rename = "ObjectType")]
    Object,
    #[serde(rename = "FunctionType")]
    Function,

    Identifier(Identifier),

    // Combinators
    #[serde(rename = "LiteralCombinator")]
    Literal(LiteralCombinator),
    #[serde(rename = "InterfaceCombinator")]
    Interface(InterfaceCombinator),
    /// Every property is treated as optional, whatever its stored flag.
    #[serde(rename = "PartialCombinator")]
    Partial(InterfaceCombinator),
    /// Rejects unknown keys at validation time.
    #[serde(rename = "StrictCombinator")]
    Strict(InterfaceCombinator),
    #[serde(rename = "UnionCombinator")]
    Union(CompositeCombinator),
    #[serde(rename = "TaggedUnionCombinator")]
    TaggedUnion(TaggedUnionCombinator),
    #[serde(rename = "IntersectionCombinator")]
    Intersection(CompositeCombinator),
    #[serde(rename = "KeyofCombinator")]
    Keyof(KeyofCombinator),
    #[serde(rename = "ArrayCombinator")]
    Array(WrappedCombinator),
    #[serde(rename = "ReadonlyArrayCombinator")]
    ReadonlyArray(WrappedCombinator),
    #[serde(rename = "TupleCombinator")]
    Tuple(CompositeCombinator),
    #[serde(rename = "DictionaryCombinator")]
    Dictionary(DictionaryCombinator),
    /// Strips unknown keys at validation time; statically the wrapped type.
    #[serde(rename = "ExactCombinator")]
    Exact(WrappedCombinator),
    #[serde(rename = "RecursiveCombinator")]
    Recursive(RecursiveCombinator),
    #[serde(rename = "CustomCombinator")]
    Custom(CustomCombinator),
}

/// Value of a literal combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// A property of an interface, partial or strict combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
    #[serde(default)]
    pub is_optional: bool,
    /// Emitted as a doc comment above the property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralCombinator {
    pub value: LiteralValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Shared shape of interface, partial and strict combinators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceCombinator {
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Shared shape of union, intersection and tuple combinators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeCombinator {
    pub types: Vec<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedUnionCombinator {
    /// Discriminant property key.
    pub tag: String,
    pub types: Vec<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyofCombinator {
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Shared shape of array, readonly-array and exact combinators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedCombinator {
    #[serde(rename = "type")]
    pub ty: Box<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryCombinator {
    pub domain: Box<TypeReference>,
    pub codomain: Box<TypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A self-referential type.
///
/// `type_parameter` and `name` must both match the enclosing declaration's
/// name for the self-reference to resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecursiveCombinator {
    pub type_parameter: Identifier,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Box<TypeReference>,
}

/// Opaque, hand-written static and runtime text.
///
/// The text is never analysed, so `dependencies` must list every identifier
/// it mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCombinator {
    #[serde(rename = "static")]
    pub static_text: String,
    #[serde(rename = "runtime")]
    pub runtime_text: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A named top-level type binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
    #[serde(default)]
    pub is_exported: bool,
    #[serde(default)]
    pub is_readonly: bool,
}

/// A hand-written declaration that still takes part in ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTypeDeclaration {
    pub name: String,
    #[serde(rename = "static")]
    pub static_text: String,
    #[serde(rename = "runtime")]
    pub runtime_text: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Any declaration accepted by [`sort`](crate::sort::sort).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    #[serde(rename = "TypeDeclaration")]
    Type(TypeDeclaration),
    #[serde(rename = "CustomTypeDeclaration")]
    Custom(CustomTypeDeclaration),
}

/// Borrowed view of anything the printers and the dependency extractor accept.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Type(&'a TypeReference),
    Declaration(&'a TypeDeclaration),
    CustomDeclaration(&'a CustomTypeDeclaration),
}

impl<'a> From<&'a TypeReference> for Node<'a> {
    fn from(ty: &'a TypeReference) -> Self {
        Node::Type(ty)
    }
}

impl<'a> From<&'a TypeDeclaration> for Node<'a> {
    fn from(decl: &'a TypeDeclaration) -> Self {
        Node::Declaration(decl)
    }
}

impl<'a> From<&'a CustomTypeDeclaration> for Node<'a> {
    fn from(decl: &'a CustomTypeDeclaration) -> Self {
        Node::CustomDeclaration(decl)
    }
}

impl<'a> From<&'a Declaration> for Node<'a> {
    fn from(decl: &'a Declaration) -> Self {
        match decl {
            Declaration::Type(d) => Node::Declaration(d),
            Declaration::Custom(d) => Node::CustomDeclaration(d),
        }
    }
}

impl TypeReference {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(LiteralCombinator {
            value: value.into(),
            name: None,
        })
    }

    pub fn interface(properties: Vec<Property>) -> Self {
        Self::Interface(InterfaceCombinator {
            properties,
            name: None,
        })
    }

    pub fn partial(properties: Vec<Property>) -> Self {
        Self::Partial(InterfaceCombinator {
            properties,
            name: None,
        })
    }

    pub fn strict(properties: Vec<Property>) -> Self {
        Self::Strict(InterfaceCombinator {
            properties,
            name: None,
        })
    }

    pub fn union(types: Vec<TypeReference>) -> Self {
        Self::Union(CompositeCombinator { types, name: None })
    }

    pub fn tagged_union(tag: impl Into<String>, types: Vec<TypeReference>) -> Self {
        Self::TaggedUnion(TaggedUnionCombinator {
            tag: tag.into(),
            types,
            name: None,
        })
    }

    pub fn intersection(types: Vec<TypeReference>) -> Self {
        Self::Intersection(CompositeCombinator { types, name: None })
    }

    pub fn keyof<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keyof(KeyofCombinator {
            values: values.into_iter().map(Into::into).collect(),
            name: None,
        })
    }

    pub fn array(ty: TypeReference) -> Self {
        Self::Array(WrappedCombinator::new(ty))
    }

    pub fn readonly_array(ty: TypeReference) -> Self {
        Self::ReadonlyArray(WrappedCombinator::new(ty))
    }

    pub fn exact(ty: TypeReference) -> Self {
        Self::Exact(WrappedCombinator::new(ty))
    }

    pub fn tuple(types: Vec<TypeReference>) -> Self {
        Self::Tuple(CompositeCombinator { types, name: None })
    }

    pub fn dictionary(domain: TypeReference, codomain: TypeReference) -> Self {
        Self::Dictionary(DictionaryCombinator {
            domain: Box::new(domain),
            codomain: Box::new(codomain),
            name: None,
        })
    }

    pub fn recursive(
        type_parameter: Identifier,
        name: impl Into<String>,
        ty: TypeReference,
    ) -> Self {
        Self::Recursive(RecursiveCombinator {
            type_parameter,
            name: name.into(),
            ty: Box::new(ty),
        })
    }

    pub fn custom(
        static_text: impl Into<String>,
        runtime_text: impl Into<String>,
        dependencies: Vec<String>,
    ) -> Self {
        Self::Custom(CustomCombinator {
            static_text: static_text.into(),
            runtime_text: runtime_text.into(),
            dependencies,
        })
    }

    /// Attach an introspection name to a combinator.
    ///
    /// Primitives, identifiers, recursive and custom combinators carry no
    /// optional name and are returned unchanged.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            Self::Literal(c) => c.name = Some(name.into()),
            Self::Interface(c) | Self::Partial(c) | Self::Strict(c) => c.name = Some(name.into()),
            Self::Union(c) | Self::Intersection(c) | Self::Tuple(c) => c.name = Some(name.into()),
            Self::TaggedUnion(c) => c.name = Some(name.into()),
            Self::Keyof(c) => c.name = Some(name.into()),
            Self::Array(c) | Self::ReadonlyArray(c) | Self::Exact(c) => c.name = Some(name.into()),
            Self::Dictionary(c) => c.name = Some(name.into()),
            Self::String
            | Self::Number
            | Self::Integer
            | Self::Boolean
            | Self::Null
            | Self::Undefined
            | Self::Any
            | Self::AnyArray
            | Self::AnyDictionary
            | Self::Object
            | Self::Function
            | Self::Identifier(_)
            | Self::Recursive(_)
            | Self::Custom(_) => {}
        }
        self
    }

    /// Introspection name of a combinator, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal(c) => c.name.as_deref(),
            Self::Interface(c) | Self::Partial(c) | Self::Strict(c) => c.name.as_deref(),
            Self::Union(c) | Self::Intersection(c) | Self::Tuple(c) => c.name.as_deref(),
            Self::TaggedUnion(c) => c.name.as_deref(),
            Self::Keyof(c) => c.name.as_deref(),
            Self::Array(c) | Self::ReadonlyArray(c) | Self::Exact(c) => c.name.as_deref(),
            Self::Dictionary(c) => c.name.as_deref(),
            Self::Recursive(c) => Some(&c.name),
            _ => None,
        }
    }

    /// The primitive's own name, as used by the runtime vocabulary.
    pub fn primitive_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "Integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Any => "any",
            Self::AnyArray => "Array",
            Self::AnyDictionary => "Dictionary",
            Self::Object => "object",
            Self::Function => "Function",
            _ => return None,
        };
        Some(name)
    }

    /// Whether this is an interface, partial or strict combinator.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Partial(_) | Self::Strict(_))
    }
}

impl WrappedCombinator {
    fn new(ty: TypeReference) -> Self {
        Self {
            ty: Box::new(ty),
            name: None,
        }
    }
}

impl Property {
    pub fn required(key: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            key: key.into(),
            ty,
            is_optional: false,
            description: None,
        }
    }

    pub fn optional(key: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            key: key.into(),
            ty,
            is_optional: true,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            is_exported: false,
            is_readonly: false,
        }
    }

    pub fn exported(mut self) -> Self {
        self.is_exported = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    /// Rewrap the type so it can refer to its own declaration.
    ///
    /// Types that are already recursive on this declaration's name are kept
    /// as they are.
    pub fn into_recursive(self) -> Self {
        if let TypeReference::Recursive(c) = &self.ty {
            if c.name == self.name {
                return self;
            }
        }
        let ty = TypeReference::recursive(Identifier::new(&self.name), &self.name, self.ty);
        Self { ty, ..self }
    }
}

impl CustomTypeDeclaration {
    pub fn new(
        name: impl Into<String>,
        static_text: impl Into<String>,
        runtime_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            static_text: static_text.into(),
            runtime_text: runtime_text.into(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Type(d) => &d.name,
            Self::Custom(d) => &d.name,
        }
    }
}

impl From<TypeDeclaration> for Declaration {
    fn from(decl: TypeDeclaration) -> Self {
        Self::Type(decl)
    }
}

impl From<CustomTypeDeclaration> for Declaration {
    fn from(decl: CustomTypeDeclaration) -> Self {
        Self::Custom(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_declarations_programmatically() {
        let declarations: Vec<Declaration> = vec![
            TypeDeclaration::new(
                "Person",
                TypeReference::interface(vec![
                    Property::required("id", TypeReference::identifier("UserId")),
                    Property::optional("email", TypeReference::String)
                        .with_description("contact address"),
                ]),
            )
            .exported()
            .into(),
            CustomTypeDeclaration::new("UserId", "type UserId = string", "const UserId = t.string")
                .into(),
        ];

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].name(), "Person");
        assert_eq!(declarations[1].name(), "UserId");
    }

    #[test]
    fn with_name_sets_combinator_names() {
        let union = TypeReference::union(vec![TypeReference::String]).with_name("Foo");
        assert_eq!(union.name(), Some("Foo"));

        let array = TypeReference::array(TypeReference::Number).with_name("Numbers");
        assert_eq!(array.name(), Some("Numbers"));
    }

    #[test]
    fn with_name_ignores_unnamed_variants() {
        assert_eq!(TypeReference::String.with_name("Foo"), TypeReference::String);
        assert_eq!(
            TypeReference::identifier("Bar").with_name("Foo"),
            TypeReference::identifier("Bar")
        );
    }

    #[test]
    fn primitive_names() {
        assert_eq!(TypeReference::Integer.primitive_name(), Some("Integer"));
        assert_eq!(TypeReference::AnyDictionary.primitive_name(), Some("Dictionary"));
        assert_eq!(TypeReference::identifier("X").primitive_name(), None);
    }

    #[test]
    fn into_recursive_wraps_once() {
        let decl = TypeDeclaration::new("Tree", TypeReference::array(TypeReference::identifier("Tree")))
            .exported()
            .into_recursive();

        let TypeReference::Recursive(c) = &decl.ty else {
            panic!("expected recursive combinator, got {:?}", decl.ty);
        };
        assert_eq!(c.name, "Tree");
        assert_eq!(c.type_parameter, Identifier::new("Tree"));
        assert!(decl.is_exported);

        assert_eq!(decl.clone().into_recursive(), decl);
    }

    #[test]
    fn deserialize_wire_format() {
        let json = r#"{
            "kind": "TypeDeclaration",
            "name": "NotificationPayload",
            "type": {
                "kind": "InterfaceCombinator",
                "properties": [
                    {
                        "kind": "Property",
                        "key": "userLanguage",
                        "type": { "kind": "StringType", "name": "string" },
                        "isOptional": true
                    },
                    {
                        "kind": "Property",
                        "key": "params",
                        "type": {
                            "kind": "DictionaryCombinator",
                            "domain": { "kind": "StringType", "name": "string" },
                            "codomain": { "kind": "AnyType", "name": "any" }
                        },
                        "isOptional": false
                    },
                    {
                        "kind": "Property",
                        "key": "kind",
                        "type": { "kind": "LiteralCombinator", "value": true }
                    }
                ],
                "name": "NotificationPayload"
            },
            "isExported": true,
            "isReadonly": false
        }"#;

        let decl: Declaration = serde_json::from_str(json).unwrap();
        let expected: Declaration = TypeDeclaration::new(
            "NotificationPayload",
            TypeReference::interface(vec![
                Property::optional("userLanguage", TypeReference::String),
                Property::required(
                    "params",
                    TypeReference::dictionary(TypeReference::String, TypeReference::Any),
                ),
                Property::required("kind", TypeReference::literal(true)),
            ])
            .with_name("NotificationPayload"),
        )
        .exported()
        .into();

        assert_eq!(decl, expected);
    }

    #[test]
    fn serialize_custom_declaration() {
        let decl: Declaration = CustomTypeDeclaration::new("A", "type A = B", "const A = B")
            .with_dependencies(["B"])
            .into();
        let value = serde_json::to_value(&decl).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "CustomTypeDeclaration",
                "name": "A",
                "static": "type A = B",
                "runtime": "const A = B",
                "dependencies": ["B"]
            })
        );
    }

    #[test]
    fn identifier_snapshot() {
        insta::assert_json_snapshot!(TypeReference::identifier("UserId"), @r#"
        {
          "kind": "Identifier",
          "name": "UserId"
        }
        "#);
    }
}
