use crate::{
    declaration::{AttributeRef, TypeDeclaration, TypeSymbol},
    identity::TypeIdentity,
};

/// Semantic resolution service of a front-end.
///
/// Returns [`None`] when the declaration doesn't correspond to a usable type,
/// in which case the declaration is skipped.
pub trait SymbolResolver<D: ?Sized> {
    #[must_use]
    fn resolve(&self, declaration: &D) -> Option<TypeSymbol>;
}

impl<D, F> SymbolResolver<D> for F
where
    D: ?Sized,
    F: Fn(&D) -> Option<TypeSymbol>,
{
    #[inline]
    fn resolve(&self, declaration: &D) -> Option<TypeSymbol> {
        self(declaration)
    }
}

/// Resolves [`TypeDeclaration`]s from the metadata they carry.
///
/// A declaration whose name or any interface name isn't a path can't be resolved.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetadataResolver;

impl SymbolResolver<TypeDeclaration> for MetadataResolver {
    fn resolve(&self, declaration: &TypeDeclaration) -> Option<TypeSymbol> {
        let identity = TypeIdentity::parse(&declaration.name)?;
        let interfaces = declaration
            .interfaces
            .iter()
            .map(|name| TypeIdentity::parse(name))
            .collect::<Option<Vec<_>>>()?;
        let attributes = declaration.attributes.iter().map(AttributeRef::new).collect();

        Some(TypeSymbol {
            identity,
            attributes,
            interfaces,
        })
    }
}
