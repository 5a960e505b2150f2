use crate::identity::TypeIdentity;

/// Syntactic view of a type declaration, as seen by the candidate collector.
pub trait Declaration {
    /// Name as written in the declaration, used for diagnostics
    #[must_use]
    fn name(&self) -> &str;

    /// Whether the declaration carries at least one attribute of any kind
    #[must_use]
    fn has_attributes(&self) -> bool;
}

/// One unit of input (a source file), holding its declarations in declaration order
#[derive(Clone, Debug)]
pub struct Document<D> {
    pub name: String,
    pub declarations: Vec<D>,
}

impl<D> Document<D> {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, declarations: Vec<D>) -> Self {
        Self {
            name: name.into(),
            declarations,
        }
    }
}

/// Declaration metadata supplied by a host that has its own front-end.
///
/// Names are kept as written; they're validated when the declaration is resolved by
/// [`crate::MetadataResolver`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub interfaces: Vec<String>,
    pub attributes: Vec<String>,
}

impl TypeDeclaration {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }
}

impl Declaration for TypeDeclaration {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// Resolved name of an attribute attached to a type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeRef {
    name: String,
}

impl AttributeRef {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Attribute type name, e.g. `scoped`, `SingletonAttribute` or `derive`
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Semantic view of a declaration: everything the interpreter needs to derive bindings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSymbol {
    pub identity: TypeIdentity,
    /// Attached attributes in declaration order
    pub attributes: Vec<AttributeRef>,
    /// Directly-implemented interfaces in declaration order
    pub interfaces: Vec<TypeIdentity>,
}
