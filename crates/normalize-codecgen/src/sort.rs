//! Declaration graph and emission ordering.
//!
//! Declarations are ordered so that every declaration comes after the ones it
//! depends on. Declarations that take part in a cycle cannot be ordered that
//! way; they are moved to the end and rewrapped in a recursive combinator so
//! the printers can emit them self-referentially.

use crate::deps::dependencies_of;
use crate::ir::{Declaration, TypeDeclaration};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Name-keyed dependency graph over one batch of declarations.
///
/// Edges are stored as names, so nothing holds a reference to another
/// declaration. Edges pointing outside the batch are kept but never followed.
#[derive(Debug)]
pub struct DeclarationGraph<'a> {
    declarations: IndexMap<&'a str, &'a Declaration>,
    edges: IndexMap<&'a str, Vec<String>>,
}

/// Result of a depth-first ordering of a [`DeclarationGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalOrder {
    /// Acyclic declarations, dependencies first.
    pub sorted: Vec<String>,
    /// Declarations on a cycle, in discovery order.
    pub recursive: Vec<String>,
}

impl TopologicalOrder {
    pub fn is_recursive(&self, name: &str) -> bool {
        self.recursive.iter().any(|n| n == name)
    }
}

impl<'a> DeclarationGraph<'a> {
    /// Build the graph. A later declaration with an already seen name
    /// replaces the earlier one but keeps its position.
    pub fn new(declarations: &'a [Declaration]) -> Self {
        let mut map = IndexMap::with_capacity(declarations.len());
        let mut edges = IndexMap::with_capacity(declarations.len());
        for decl in declarations {
            map.insert(decl.name(), decl);
            edges.insert(decl.name(), dependencies_of(decl));
        }
        Self {
            declarations: map,
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declaration names in input order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.declarations.keys().copied()
    }

    pub fn get(&self, name: &str) -> Option<&'a Declaration> {
        self.declarations.get(name).copied()
    }

    /// Direct dependencies of `name`, empty when the name is unknown.
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn topological_order(&self) -> TopologicalOrder {
        let mut visit = Visit {
            graph: self,
            visited: HashSet::with_capacity(self.len()),
            ancestors: Vec::new(),
            recursive: IndexSet::new(),
            postorder: Vec::with_capacity(self.len()),
        };
        for name in self.names() {
            visit.visit(name);
        }

        let Visit {
            recursive,
            postorder,
            ..
        } = visit;
        TopologicalOrder {
            sorted: postorder
                .into_iter()
                .filter(|name| !recursive.contains(name))
                .map(str::to_string)
                .collect(),
            recursive: recursive.into_iter().map(str::to_string).collect(),
        }
    }
}

struct Visit<'g, 'a> {
    graph: &'g DeclarationGraph<'a>,
    visited: HashSet<&'g str>,
    ancestors: Vec<&'g str>,
    recursive: IndexSet<&'g str>,
    postorder: Vec<&'g str>,
}

impl<'g> Visit<'g, '_> {
    fn visit(&mut self, name: &'g str) {
        if self.visited.contains(name) || !self.graph.edges.contains_key(name) {
            return;
        }
        self.visited.insert(name);
        self.ancestors.push(name);

        let graph = self.graph;
        for dep in graph.dependencies(name) {
            let dep = dep.as_str();
            if self.ancestors.contains(&dep) {
                trace!(from = name, to = dep, "cycle detected");
                self.recursive.insert(name);
                self.recursive.insert(dep);
            } else {
                self.visit(dep);
            }
        }

        self.ancestors.pop();
        self.postorder.push(name);
    }
}

/// Order declarations for single-pass emission.
///
/// Acyclic declarations come first, each after everything it depends on.
/// Declarations on a cycle follow in discovery order; type declarations among
/// them are rewrapped with [`TypeDeclaration::into_recursive`], custom ones
/// are kept unchanged.
pub fn sort(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let order = DeclarationGraph::new(&declarations).topological_order();
    debug!(
        declarations = declarations.len(),
        recursive = order.recursive.len(),
        "sorted declarations"
    );

    let mut by_name: IndexMap<String, Declaration> = declarations
        .into_iter()
        .map(|decl| (decl.name().to_string(), decl))
        .collect();

    let mut sorted = Vec::with_capacity(by_name.len());
    for name in &order.sorted {
        if let Some(decl) = by_name.swap_remove(name) {
            sorted.push(decl);
        }
    }
    for name in &order.recursive {
        match by_name.swap_remove(name) {
            Some(Declaration::Type(decl)) => sorted.push(Declaration::Type(decl.into_recursive())),
            Some(custom @ Declaration::Custom(_)) => sorted.push(custom),
            None => {}
        }
    }
    sorted
}

/// Convenience for batches made only of type declarations.
pub fn sort_type_declarations(declarations: Vec<TypeDeclaration>) -> Vec<Declaration> {
    sort(declarations.into_iter().map(Declaration::Type).collect())
}
