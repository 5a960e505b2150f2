use std::collections::{btree_map::Entry, BTreeMap};
use syn::{Attribute, Generics, Ident, Item, ItemImpl, Path, Type, TypePath};
use tracing::{trace, warn};

use super::{
    display_module,
    scope::{is_anchored, ModuleScope},
    SourceDocument,
};
use crate::{
    declaration::{AttributeRef, Declaration, Document, TypeSymbol},
    identity::{display_path, TypeIdentity},
    resolver::SymbolResolver,
};

/// Type declaration (`struct`, `enum` or `union`) found in a Rust source
#[derive(Clone, Debug)]
pub struct SourceDeclaration {
    name: String,
    ident: Ident,
    module: Vec<String>,
    attrs: Vec<Attribute>,
    generics: Generics,
}

impl SourceDeclaration {
    #[inline]
    #[must_use]
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Module the declaration sits in, relative to the crate root
    #[inline]
    #[must_use]
    pub fn module(&self) -> &[String] {
        &self.module
    }
}

impl Declaration for SourceDeclaration {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn has_attributes(&self) -> bool {
        !self.attrs.is_empty()
    }
}

/// Declarations of a crate with the scopes and trait impls needed to resolve them
#[derive(Debug, Default)]
pub struct SourceTree {
    documents: Vec<Document<SourceDeclaration>>,
    scopes: BTreeMap<Vec<String>, ModuleScope>,
    /// Traits implemented by a type, keyed by the type's `crate::...` path, in declaration order
    impls: BTreeMap<String, Vec<ImplementedTrait>>,
}

/// Trait of an `impl Trait for Type` block, resolved in the module of the block
#[derive(Debug)]
struct ImplementedTrait {
    path: Path,
    anchored: bool,
}

impl SourceTree {
    /// Walks the documents in order, and the items of each document in declaration order.
    /// Items of inline modules are visited where the module is declared.
    #[must_use]
    pub fn new(documents: &[SourceDocument]) -> Self {
        let mut tree = Self::default();

        for document in documents {
            let mut declarations = Vec::new();
            tree.walk(document.module().to_vec(), &document.file().items, &mut declarations);
            tree.documents.push(Document::new(document.name(), declarations));
        }

        trace!(
            documents = tree.documents.len(),
            modules = tree.scopes.len(),
            implementors = tree.impls.len(),
            "Source tree built"
        );

        tree
    }

    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[Document<SourceDeclaration>] {
        &self.documents
    }

    fn walk(&mut self, module: Vec<String>, items: &[Item], declarations: &mut Vec<SourceDeclaration>) {
        let scope = ModuleScope::new(module.clone(), items);

        for item in items {
            match item {
                Item::Struct(item) => declarations.push(declaration(&item.ident, &module, &item.attrs, &item.generics)),
                Item::Enum(item) => declarations.push(declaration(&item.ident, &module, &item.attrs, &item.generics)),
                Item::Union(item) => declarations.push(declaration(&item.ident, &module, &item.attrs, &item.generics)),
                Item::Impl(item) => self.index_impl(&scope, item),
                Item::Mod(item) => {
                    let Some((_, items)) = &item.content else {
                        continue;
                    };
                    if is_cfg_test(&item.attrs) {
                        continue;
                    }
                    let mut child = module.clone();
                    child.push(item.ident.to_string());
                    self.walk(child, items, declarations);
                }
                _ => {}
            }
        }

        match self.scopes.entry(module) {
            Entry::Vacant(entry) => {
                entry.insert(scope);
            }
            Entry::Occupied(mut entry) => {
                warn!(
                    module = %display_module(entry.key()),
                    "Module is declared by several documents, merging their scopes"
                );
                entry.get_mut().merge(scope);
            }
        }
    }

    fn index_impl(&mut self, scope: &ModuleScope, item: &ItemImpl) {
        let Some((None, trait_path, _)) = &item.trait_ else {
            return;
        };
        let Type::Path(TypePath { qself: None, path: self_path }) = item.self_ty.as_ref() else {
            return;
        };
        // The trait arguments may name impl parameters, which are unbound where the registration is emitted
        if !item.generics.params.is_empty() {
            trace!(contract = %display_path(trait_path), "Generic impl skipped");
            return;
        }

        let implementor = display_path(&scope.resolve(self_path));
        let path = scope.resolve(trait_path);
        self.impls.entry(implementor).or_default().push(ImplementedTrait {
            anchored: is_anchored(&path),
            path,
        });
    }
}

fn declaration(ident: &Ident, module: &[String], attrs: &[Attribute], generics: &Generics) -> SourceDeclaration {
    SourceDeclaration {
        name: ident.to_string(),
        ident: ident.clone(),
        module: module.to_vec(),
        attrs: attrs.to_vec(),
        generics: generics.clone(),
    }
}

fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .any(|attr| attr.path().is_ident("cfg") && attr.parse_args::<Ident>().is_ok_and(|ident| ident == "test"))
}

/// Resolves [`SourceDeclaration`]s of one [`SourceTree`].
///
/// Generic declarations can't be registered as concrete types and are unresolvable.
#[derive(Debug)]
pub struct SourceResolver<'a> {
    tree: &'a SourceTree,
    crate_root: Path,
}

impl<'a> SourceResolver<'a> {
    /// `crate_root` replaces the leading `crate` of resolved identities
    #[inline]
    #[must_use]
    pub fn new(tree: &'a SourceTree, crate_root: Path) -> Self {
        Self { tree, crate_root }
    }

    fn rooted(&self, path: Path) -> TypeIdentity {
        let starts_with_crate = path.leading_colon.is_none() && path.segments.first().is_some_and(|first| first.ident == "crate");
        if !starts_with_crate || self.crate_root.is_ident("crate") {
            return TypeIdentity::from_path(path);
        }

        let mut rooted = self.crate_root.clone();
        rooted.segments.extend(path.segments.into_iter().skip(1));
        TypeIdentity::from_path(rooted)
    }
}

impl SymbolResolver<SourceDeclaration> for SourceResolver<'_> {
    fn resolve(&self, declaration: &SourceDeclaration) -> Option<TypeSymbol> {
        if !declaration.generics.params.is_empty() {
            trace!(declaration = %declaration.ident, "Generic declaration can't be resolved");
            return None;
        }
        let scope = self.tree.scopes.get(&declaration.module)?;

        let path = scope.item_path(&declaration.ident);
        let implemented = self.tree.impls.get(&display_path(&path)).map_or(&[][..], Vec::as_slice);
        if let Some(unknown) = implemented.iter().find(|implemented| !implemented.anchored) {
            warn!(
                declaration = %declaration.ident,
                contract = %display_path(&unknown.path),
                "Declaration skipped: implemented trait can't be named from the crate root"
            );
            return None;
        }
        let interfaces = implemented
            .iter()
            .map(|implemented| self.rooted(implemented.path.clone()))
            .collect();
        let attributes = declaration
            .attrs
            .iter()
            .filter_map(|attr| {
                let resolved = scope.resolve(attr.path());
                resolved.segments.last().map(|last| AttributeRef::new(last.ident.to_string()))
            })
            .collect();

        Some(TypeSymbol {
            identity: self.rooted(path),
            attributes,
            interfaces,
        })
    }
}
