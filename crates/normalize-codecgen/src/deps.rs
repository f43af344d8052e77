//! Structural dependency extraction.

use crate::ir::{Node, TypeReference};

/// Names of the declarations a node structurally refers to.
///
/// Names appear in first-seen traversal order and may repeat; callers that
/// need a set must dedupe. Custom nodes contribute their declared
/// dependency list verbatim.
pub fn dependencies_of<'a>(node: impl Into<Node<'a>>) -> Vec<String> {
    let mut deps = Vec::new();
    match node.into() {
        Node::Type(ty) => collect(ty, &mut deps),
        Node::Declaration(decl) => collect(&decl.ty, &mut deps),
        Node::CustomDeclaration(decl) => deps.extend(decl.dependencies.iter().cloned()),
    }
    deps
}

fn collect(ty: &TypeReference, deps: &mut Vec<String>) {
    match ty {
        TypeReference::Identifier(id) => deps.push(id.name.clone()),
        TypeReference::Interface(c) | TypeReference::Partial(c) | TypeReference::Strict(c) => {
            for property in &c.properties {
                collect(&property.ty, deps);
            }
        }
        TypeReference::Union(c) | TypeReference::Intersection(c) | TypeReference::Tuple(c) => {
            for member in &c.types {
                collect(member, deps);
            }
        }
        TypeReference::TaggedUnion(c) => {
            for member in &c.types {
                collect(member, deps);
            }
        }
        TypeReference::Dictionary(c) => {
            collect(&c.domain, deps);
            collect(&c.codomain, deps);
        }
        TypeReference::Array(c) | TypeReference::ReadonlyArray(c) | TypeReference::Exact(c) => {
            collect(&c.ty, deps);
        }
        TypeReference::Recursive(c) => collect(&c.ty, deps),
        TypeReference::Custom(c) => deps.extend(c.dependencies.iter().cloned()),
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
        | TypeReference::Function
        | TypeReference::Literal(_)
        | TypeReference::Keyof(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{CustomTypeDeclaration, Identifier, Property, TypeDeclaration};

    fn id(name: &str) -> TypeReference {
        TypeReference::identifier(name)
    }

    #[test]
    fn identifier_depends_on_itself() {
        assert_eq!(dependencies_of(&id("Foo")), vec!["Foo"]);
    }

    #[test]
    fn leaves_have_no_dependencies() {
        assert!(dependencies_of(&TypeReference::String).is_empty());
        assert!(dependencies_of(&TypeReference::literal("a")).is_empty());
        assert!(dependencies_of(&TypeReference::keyof(["a", "b"])).is_empty());
    }

    #[test]
    fn properties_in_order() {
        let ty = TypeReference::interface(vec![
            Property::required("a", id("A")),
            Property::optional("b", TypeReference::array(id("B"))),
            Property::required("c", TypeReference::String),
            Property::required("d", id("A")),
        ]);
        assert_eq!(dependencies_of(&ty), vec!["A", "B", "A"]);
    }

    #[test]
    fn members_and_dictionary() {
        let ty = TypeReference::tagged_union(
            "type",
            vec![
                TypeReference::dictionary(id("K"), id("V")),
                TypeReference::tuple(vec![id("T1"), TypeReference::Null, id("T2")]),
                TypeReference::intersection(vec![TypeReference::exact(id("E"))]),
            ],
        );
        assert_eq!(dependencies_of(&ty), vec!["K", "V", "T1", "T2", "E"]);
    }

    #[test]
    fn declarations_and_recursion() {
        let decl = TypeDeclaration::new(
            "Category",
            TypeReference::recursive(
                Identifier::new("Category"),
                "Category",
                TypeReference::interface(vec![Property::required(
                    "categories",
                    TypeReference::readonly_array(id("Category")),
                )]),
            ),
        );
        assert_eq!(dependencies_of(&decl), vec!["Category"]);
    }

    #[test]
    fn custom_nodes_use_declared_list() {
        let custom = TypeReference::custom("Option<A>", "option(B)", vec!["C".into()]);
        assert_eq!(dependencies_of(&custom), vec!["C"]);

        let decl = CustomTypeDeclaration::new("P", "type P = Q", "const P = Q")
            .with_dependencies(["RawP", "RawP"]);
        assert_eq!(dependencies_of(&decl), vec!["RawP", "RawP"]);
    }
}
