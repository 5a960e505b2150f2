use proc_macro2::Span;
use std::collections::{BTreeMap, BTreeSet};
use syn::{punctuated::Punctuated, Ident, Item, Path, PathArguments, PathSegment, UseTree};

use crate::identity::display_path;

/// Traits of the standard prelude, which are in scope without imports
const PRELUDE: &[(&str, &str)] = &[
    ("Drop", "core::ops::Drop"),
    ("Fn", "core::ops::Fn"),
    ("FnMut", "core::ops::FnMut"),
    ("FnOnce", "core::ops::FnOnce"),
    ("Clone", "core::clone::Clone"),
    ("Copy", "core::marker::Copy"),
    ("Send", "core::marker::Send"),
    ("Sized", "core::marker::Sized"),
    ("Sync", "core::marker::Sync"),
    ("Unpin", "core::marker::Unpin"),
    ("Default", "core::default::Default"),
    ("Eq", "core::cmp::Eq"),
    ("Ord", "core::cmp::Ord"),
    ("PartialEq", "core::cmp::PartialEq"),
    ("PartialOrd", "core::cmp::PartialOrd"),
    ("AsMut", "core::convert::AsMut"),
    ("AsRef", "core::convert::AsRef"),
    ("From", "core::convert::From"),
    ("Into", "core::convert::Into"),
    ("TryFrom", "core::convert::TryFrom"),
    ("TryInto", "core::convert::TryInto"),
    ("DoubleEndedIterator", "core::iter::DoubleEndedIterator"),
    ("ExactSizeIterator", "core::iter::ExactSizeIterator"),
    ("Extend", "core::iter::Extend"),
    ("IntoIterator", "core::iter::IntoIterator"),
    ("Iterator", "core::iter::Iterator"),
    ("ToOwned", "alloc::borrow::ToOwned"),
    ("ToString", "alloc::string::ToString"),
];

/// Names visible in one module: its `use` imports and the items it declares.
///
/// Paths are resolved to the `crate::module::Item` form; paths into other crates are left as written.
#[derive(Debug, Default)]
pub(crate) struct ModuleScope {
    module: Vec<String>,
    imports: BTreeMap<String, Path>,
    locals: BTreeSet<String>,
}

impl ModuleScope {
    pub(crate) fn new(module: Vec<String>, items: &[Item]) -> Self {
        let mut scope = Self {
            module,
            imports: BTreeMap::new(),
            locals: items.iter().filter_map(local_name).map(|ident| ident.to_string()).collect(),
        };

        let mut imports = Vec::new();
        for item in items {
            if let Item::Use(item_use) = item {
                collect_imports(&item_use.tree, &mut Vec::new(), item_use.leading_colon.is_some(), &mut imports);
            }
        }
        // Imports are resolved against the module's own items only, chains of re-exports aren't followed
        for (alias, target) in imports {
            let target = scope.absolutize(&target);
            scope.imports.entry(alias).or_insert(target);
        }

        scope
    }

    /// Path of an item declared in this module, in `crate::module::Item` form
    pub(crate) fn item_path(&self, ident: &Ident) -> Path {
        join(self.module_prefix(self.module.len()), [PathSegment::from(ident.clone())])
    }

    /// Resolves a path written in this module and canonicalizes prelude traits
    pub(crate) fn resolve(&self, path: &Path) -> Path {
        let path = match path.segments.first() {
            Some(first) if path.leading_colon.is_none() => match self.imports.get(&first.ident.to_string()) {
                Some(target) => substitute_first(target, path),
                None => self.absolutize(path),
            },
            _ => path.clone(),
        };
        canonicalize(path)
    }

    /// Adds the names of another file of the same module, the names already in scope win
    pub(crate) fn merge(&mut self, other: ModuleScope) {
        for (alias, target) in other.imports {
            self.imports.entry(alias).or_insert(target);
        }
        self.locals.extend(other.locals);
    }

    fn absolutize(&self, path: &Path) -> Path {
        let Some(first) = path.segments.first() else {
            return path.clone();
        };
        if path.leading_colon.is_some() {
            return path.clone();
        }

        let first = first.ident.to_string();
        match first.as_str() {
            "crate" | "Self" => path.clone(),
            "self" => join(self.module_prefix(self.module.len()), path.segments.iter().skip(1).cloned()),
            "super" => {
                let supers = path.segments.iter().take_while(|segment| segment.ident == "super").count();
                match self.module.len().checked_sub(supers) {
                    Some(depth) => join(self.module_prefix(depth), path.segments.iter().skip(supers).cloned()),
                    None => path.clone(),
                }
            }
            name if self.locals.contains(name) => join(self.module_prefix(self.module.len()), path.segments.iter().cloned()),
            name if path.segments.len() == 1 => match PRELUDE.iter().find(|(prelude_name, _)| *prelude_name == name) {
                Some((_, canonical)) => with_arguments(parse_known_path(canonical), &path.segments[0].arguments),
                None => path.clone(),
            },
            _ => path.clone(),
        }
    }

    fn module_prefix(&self, depth: usize) -> impl Iterator<Item = PathSegment> + '_ {
        core::iter::once(segment("crate")).chain(self.module[..depth].iter().map(|name| segment(name)))
    }
}

/// Whether a resolved path can be named from the crate root.
///
/// A single segment left after resolution is a name the scope doesn't know, e.g. one brought in by a glob import.
pub(crate) fn is_anchored(path: &Path) -> bool {
    path.leading_colon.is_some() || path.segments.len() > 1
}

fn local_name(item: &Item) -> Option<&Ident> {
    match item {
        Item::Struct(item) => Some(&item.ident),
        Item::Enum(item) => Some(&item.ident),
        Item::Union(item) => Some(&item.ident),
        Item::Trait(item) => Some(&item.ident),
        Item::TraitAlias(item) => Some(&item.ident),
        Item::Type(item) => Some(&item.ident),
        Item::Mod(item) => Some(&item.ident),
        _ => None,
    }
}

fn collect_imports(tree: &UseTree, prefix: &mut Vec<Ident>, leading_colon: bool, out: &mut Vec<(String, Path)>) {
    match tree {
        UseTree::Path(use_path) => {
            prefix.push(use_path.ident.clone());
            collect_imports(&use_path.tree, prefix, leading_colon, out);
            prefix.pop();
        }
        UseTree::Name(use_name) => {
            if use_name.ident == "self" {
                if let Some(last) = prefix.last() {
                    out.push((last.to_string(), import_path(prefix, None, leading_colon)));
                }
            } else {
                out.push((use_name.ident.to_string(), import_path(prefix, Some(&use_name.ident), leading_colon)));
            }
        }
        UseTree::Rename(use_rename) => {
            if use_rename.rename == "_" {
                return;
            }
            let ident = (use_rename.ident != "self").then_some(&use_rename.ident);
            out.push((use_rename.rename.to_string(), import_path(prefix, ident, leading_colon)));
        }
        UseTree::Group(use_group) => {
            for tree in &use_group.items {
                collect_imports(tree, prefix, leading_colon, out);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn import_path(prefix: &[Ident], last: Option<&Ident>, leading_colon: bool) -> Path {
    let mut path = path_from(prefix.iter().chain(last).cloned().map(PathSegment::from));
    if leading_colon {
        path.leading_colon = Some(Default::default());
    }
    path
}

fn segment(name: &str) -> PathSegment {
    PathSegment::from(Ident::new(name, Span::call_site()))
}

fn join(head: impl IntoIterator<Item = PathSegment>, tail: impl IntoIterator<Item = PathSegment>) -> Path {
    path_from(head.into_iter().chain(tail))
}

/// Replaces the first segment of `path` with the import `target`, keeping the generic arguments written on it
fn substitute_first(target: &Path, path: &Path) -> Path {
    let first_arguments = &path.segments[0].arguments;
    let mut resolved = with_arguments(target.clone(), first_arguments);
    resolved.segments.extend(path.segments.iter().skip(1).cloned());
    resolved
}

fn with_arguments(mut path: Path, arguments: &PathArguments) -> Path {
    if !arguments.is_empty() {
        if let Some(last) = path.segments.last_mut() {
            last.arguments = arguments.clone();
        }
    }
    path
}

/// Drops the leading `::` of standard crates and spells prelude traits through `core` (or `alloc`),
/// so `Drop`, `std::ops::Drop` and `::core::ops::Drop` resolve to the same path
fn canonicalize(mut path: Path) -> Path {
    let Some(first) = path.segments.first() else {
        return path;
    };
    let is_std_crate = first.ident == "std" || first.ident == "core" || first.ident == "alloc";
    if !is_std_crate {
        return path;
    }
    path.leading_colon = None;

    if path.segments[0].ident == "std" {
        let mut bare = path.clone();
        if let Some(last) = bare.segments.last_mut() {
            last.arguments = PathArguments::None;
        }
        let bare = display_path(&bare);
        let rest = &bare["std".len()..];
        let reexported_from = ["core", "alloc"]
            .into_iter()
            .find(|krate| PRELUDE.iter().any(|(_, canonical)| *canonical == [*krate, rest].concat()));
        if let Some(krate) = reexported_from {
            path.segments[0].ident = Ident::new(krate, Span::call_site());
        }
    }

    path
}

fn path_from(segments: impl IntoIterator<Item = PathSegment>) -> Path {
    Path {
        leading_colon: None,
        segments: segments.into_iter().collect::<Punctuated<_, _>>(),
    }
}

fn parse_known_path(path: &str) -> Path {
    path_from(path.split("::").map(segment))
}

#[cfg(test)]
mod tests {
    use super::{is_anchored, ModuleScope};
    use crate::identity::display_path;

    fn scope(module: &[&str], source: &str) -> ModuleScope {
        let file = syn::parse_file(source).unwrap();
        ModuleScope::new(module.iter().map(|name| (*name).to_owned()).collect(), &file.items)
    }

    fn resolve(scope: &ModuleScope, path: &str) -> String {
        display_path(&scope.resolve(&syn::parse_str(path).unwrap()))
    }

    #[test]
    fn test_resolve_relative_paths() {
        let scope = scope(
            &["services", "users"],
            "
            pub struct UserService;
            pub trait IUserService {}
            mod inner {}
            ",
        );

        assert_eq!(resolve(&scope, "IUserService"), "crate::services::users::IUserService");
        assert_eq!(resolve(&scope, "inner::Thing"), "crate::services::users::inner::Thing");
        assert_eq!(resolve(&scope, "self::IUserService"), "crate::services::users::IUserService");
        assert_eq!(resolve(&scope, "super::IRepo"), "crate::services::IRepo");
        assert_eq!(resolve(&scope, "super::super::IRepo"), "crate::IRepo");
        assert_eq!(resolve(&scope, "crate::contracts::IRepo"), "crate::contracts::IRepo");
        assert_eq!(resolve(&scope, "serde::Serialize"), "serde::Serialize");
        assert_eq!(resolve(&scope, "::serde::Serialize"), "::serde::Serialize");
        assert_eq!(resolve(&scope, "Unknown"), "Unknown");
    }

    #[test]
    fn test_resolve_imports() {
        let scope = scope(
            &["services"],
            "
            use crate::contracts::{IUserService, repo::{self, IRepo as Repository}};
            use super::events::Handler;
            use autoreg::scoped as per_scope;
            use crate::ignored as _;
            use crate::prelude::*;
            ",
        );

        assert_eq!(resolve(&scope, "IUserService"), "crate::contracts::IUserService");
        assert_eq!(resolve(&scope, "Repository"), "crate::contracts::repo::IRepo");
        assert_eq!(resolve(&scope, "repo::IOther"), "crate::contracts::repo::IOther");
        assert_eq!(resolve(&scope, "Handler<Event>"), "crate::events::Handler<Event>");
        assert_eq!(resolve(&scope, "per_scope"), "autoreg::scoped");
        assert_eq!(resolve(&scope, "IPrelude"), "IPrelude");
    }

    #[test]
    fn test_resolve_prelude_traits() {
        let scope = scope(&[], "");

        assert_eq!(resolve(&scope, "Drop"), "core::ops::Drop");
        assert_eq!(resolve(&scope, "std::ops::Drop"), "core::ops::Drop");
        assert_eq!(resolve(&scope, "::std::ops::Drop"), "core::ops::Drop");
        assert_eq!(resolve(&scope, "::core::ops::Drop"), "core::ops::Drop");
        assert_eq!(resolve(&scope, "From<u8>"), "core::convert::From<u8>");
        assert_eq!(resolve(&scope, "std::string::ToString"), "alloc::string::ToString");
        assert_eq!(resolve(&scope, "std::fmt::Display"), "std::fmt::Display");
    }

    #[test]
    fn test_local_items_shadow_prelude() {
        let scope = scope(&[], "trait Drop {}");
        assert_eq!(resolve(&scope, "Drop"), "crate::Drop");
    }

    #[test]
    fn test_unknown_names_not_anchored() {
        let scope = scope(&["services"], "use crate::contracts::*; use serde::Serialize; trait ILocal {}");

        let anchored = ["IFoo", "Serialize", "ILocal", "Drop", "::IFoo"]
            .map(|path| is_anchored(&scope.resolve(&syn::parse_str(path).unwrap())));
        assert_eq!(anchored, [false, true, true, true, true]);
    }

    #[test]
    fn test_merge() {
        let mut first = scope(&["services"], "use crate::contracts::IFoo; struct A;");
        let second = scope(&["services"], "use crate::other::IFoo; use crate::contracts::IBar; struct B;");
        first.merge(second);

        assert_eq!(resolve(&first, "IFoo"), "crate::contracts::IFoo");
        assert_eq!(resolve(&first, "IBar"), "crate::contracts::IBar");
        assert_eq!(resolve(&first, "B"), "crate::services::B");
    }
}
