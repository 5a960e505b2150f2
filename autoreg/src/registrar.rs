use alloc::vec::Vec;
use core::slice;
use tracing::debug;

use crate::{any::TypeInfo, lifetime::Lifetime};

/// Sink of the generated registration entry point.
///
/// A container integration implements it to turn registrations into its own entries.
/// Duplicate and conflicting registrations are passed through as they come;
/// accepting, overriding or rejecting them is up to the implementation.
pub trait ServiceRegistrar {
    /// Registers `Impl` under the `Contract` it implements, usually a `dyn Trait`
    fn register<Contract, Impl>(&mut self, lifetime: Lifetime)
    where
        Contract: ?Sized + 'static,
        Impl: 'static;

    /// Registers `Impl` under itself
    #[inline]
    fn register_self<Impl>(&mut self, lifetime: Lifetime)
    where
        Impl: 'static,
    {
        self.register::<Impl, Impl>(lifetime);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub contract: TypeInfo,
    pub implementation: TypeInfo,
    pub lifetime: Lifetime,
}

impl Registration {
    /// Whether the implementation is registered under itself
    #[inline]
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.contract == self.implementation
    }
}

/// Registrar that records registrations in order, duplicates included
#[derive(Debug, Clone, Default)]
pub struct Registrations {
    entries: Vec<Registration>,
}

impl Registrations {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Registration> {
        self.entries.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Registration] {
        &self.entries
    }

    /// Registrations made under `Contract`, in registration order
    pub fn by_contract<Contract>(&self) -> impl Iterator<Item = &Registration>
    where
        Contract: ?Sized + 'static,
    {
        let contract = TypeInfo::of::<Contract>();
        self.entries.iter().filter(move |registration| registration.contract == contract)
    }
}

impl ServiceRegistrar for Registrations {
    fn register<Contract, Impl>(&mut self, lifetime: Lifetime)
    where
        Contract: ?Sized + 'static,
        Impl: 'static,
    {
        let registration = Registration {
            contract: TypeInfo::of::<Contract>(),
            implementation: TypeInfo::of::<Impl>(),
            lifetime,
        };
        debug!(
            contract = registration.contract.short_name(),
            implementation = registration.implementation.short_name(),
            lifetime = lifetime.name(),
            "Registered"
        );
        self.entries.push(registration);
    }
}

impl Extend<Registration> for Registrations {
    fn extend<T: IntoIterator<Item = Registration>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Registrations {
    type Item = &'a Registration;
    type IntoIter = slice::Iter<'a, Registration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
