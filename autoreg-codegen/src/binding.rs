use core::slice;

use crate::{identity::TypeIdentity, lifetime::LifetimeTag};

/// One registration: an implementation, the contract it's registered under and its lifetime.
///
/// Without a contract the implementation is registered under itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceBinding {
    pub implementation: TypeIdentity,
    pub contract: Option<TypeIdentity>,
    pub lifetime: LifetimeTag,
}

/// Bindings of one generation pass, in the order their declarations were visited
/// and then in attribute order within a declaration.
///
/// Bindings are never reordered, deduplicated or grouped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedRegistrationSet {
    bindings: Vec<ServiceBinding>,
}

impl GeneratedRegistrationSet {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, binding: ServiceBinding) {
        self.bindings.push(binding);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, ServiceBinding> {
        self.bindings.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[ServiceBinding] {
        &self.bindings
    }
}

impl Extend<ServiceBinding> for GeneratedRegistrationSet {
    fn extend<T: IntoIterator<Item = ServiceBinding>>(&mut self, iter: T) {
        self.bindings.extend(iter);
    }
}

impl FromIterator<ServiceBinding> for GeneratedRegistrationSet {
    fn from_iter<T: IntoIterator<Item = ServiceBinding>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GeneratedRegistrationSet {
    type Item = &'a ServiceBinding;
    type IntoIter = slice::Iter<'a, ServiceBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for GeneratedRegistrationSet {
    type Item = ServiceBinding;
    type IntoIter = std::vec::IntoIter<ServiceBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}
