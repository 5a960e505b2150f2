use std::collections::BTreeSet;
use tracing::debug;

use crate::{
    binding::{GeneratedRegistrationSet, ServiceBinding},
    declaration::{Declaration, TypeSymbol},
    identity::TypeIdentity,
    lifetime::LifetimeTag,
    resolver::SymbolResolver,
};

/// Turns candidate declarations into service bindings
#[derive(Clone, Debug)]
pub struct Interpreter {
    marker: TypeIdentity,
    /// Base names of excluded contracts
    excluded: BTreeSet<String>,
}

impl Interpreter {
    /// Creates an interpreter that never uses `marker` as a contract
    #[inline]
    #[must_use]
    pub fn new(marker: TypeIdentity) -> Self {
        Self {
            marker,
            excluded: BTreeSet::new(),
        }
    }

    /// Never uses `contracts` as contracts either, whatever their generic arguments
    #[must_use]
    pub fn excluding<I>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = TypeIdentity>,
    {
        self.excluded.extend(contracts.into_iter().map(|contract| contract.base_name().to_owned()));
        self
    }

    #[inline]
    #[must_use]
    pub fn marker(&self) -> &TypeIdentity {
        &self.marker
    }

    /// Interprets candidates in order, skipping the ones the resolver can't resolve
    #[must_use]
    pub fn interpret<'a, D, R>(&self, candidates: impl IntoIterator<Item = &'a D>, resolver: &R) -> GeneratedRegistrationSet
    where
        D: Declaration + ?Sized + 'a,
        R: SymbolResolver<D> + ?Sized,
    {
        let mut registrations = GeneratedRegistrationSet::new();
        for candidate in candidates {
            if let Some(bindings) = self.interpret_candidate(candidate, resolver) {
                registrations.extend(bindings);
            }
        }
        registrations
    }

    /// Derives one binding per lifetime attribute of the candidate, in attribute order.
    ///
    /// Returns [`None`] if the candidate can't be resolved.
    /// A resolved candidate without lifetime attributes yields an empty list.
    #[must_use]
    pub fn interpret_candidate<D, R>(&self, candidate: &D, resolver: &R) -> Option<Vec<ServiceBinding>>
    where
        D: Declaration + ?Sized,
        R: SymbolResolver<D> + ?Sized,
    {
        let Some(symbol) = resolver.resolve(candidate) else {
            debug!(declaration = candidate.name(), "Candidate skipped: unresolved");
            return None;
        };

        let bindings = symbol
            .attributes
            .iter()
            .filter_map(|attribute| LifetimeTag::from_attribute_name(attribute.name()))
            .map(|lifetime| {
                let binding = ServiceBinding {
                    implementation: symbol.identity.clone(),
                    contract: self.infer_contract(&symbol),
                    lifetime,
                };
                debug!(
                    implementation = binding.implementation.name(),
                    contract = binding.contract.as_ref().map(TypeIdentity::name),
                    %lifetime,
                    "Binding derived"
                );
                binding
            })
            .collect();

        Some(bindings)
    }

    /// First directly-implemented interface that isn't the marker or excluded, in declaration order
    #[must_use]
    pub fn infer_contract(&self, symbol: &TypeSymbol) -> Option<TypeIdentity> {
        symbol.interfaces.iter().find(|interface| !self.is_excluded(interface)).cloned()
    }

    #[must_use]
    pub fn is_excluded(&self, interface: &TypeIdentity) -> bool {
        interface.base_name() == self.marker.base_name() || self.excluded.contains(interface.base_name())
    }
}

#[cfg(test)]
mod tests {
    use super::Interpreter;
    use crate::{
        declaration::{AttributeRef, TypeSymbol},
        Declaration, LifetimeTag, MetadataResolver, TypeDeclaration, TypeIdentity,
    };

    use tracing_test::traced_test;

    fn interpreter() -> Interpreter {
        Interpreter::new(TypeIdentity::parse("core::ops::Drop").unwrap())
    }

    fn contract_of(declaration: &TypeDeclaration) -> Option<String> {
        let bindings = interpreter().interpret_candidate(declaration, &MetadataResolver).unwrap();
        assert_eq!(bindings.len(), 1);
        bindings[0].contract.as_ref().map(|contract| contract.name().to_owned())
    }

    #[test]
    fn test_lifetime_mapping() {
        for (attribute, lifetime) in [
            ("scoped", LifetimeTag::Scoped),
            ("SingletonAttribute", LifetimeTag::Singleton),
            ("Transient", LifetimeTag::Transient),
        ] {
            let declaration = TypeDeclaration::new("app::Service").with_attribute(attribute);
            let bindings = interpreter().interpret_candidate(&declaration, &MetadataResolver).unwrap();

            assert_eq!(bindings.len(), 1);
            assert_eq!(bindings[0].lifetime, lifetime);
            assert_eq!(bindings[0].implementation.name(), "app::Service");
        }
    }

    #[test]
    fn test_contract_is_first_non_marker_interface() {
        let declaration = TypeDeclaration::new("app::Service")
            .implements("core::ops::Drop")
            .implements("app::IFoo")
            .implements("app::IBar")
            .with_attribute("scoped");
        assert_eq!(contract_of(&declaration).as_deref(), Some("app::IFoo"));

        let declaration = TypeDeclaration::new("app::Service")
            .implements("app::IBar")
            .implements("core::ops::Drop")
            .implements("app::IFoo")
            .with_attribute("scoped");
        assert_eq!(contract_of(&declaration).as_deref(), Some("app::IBar"));
    }

    #[test]
    fn test_marker_spellings() {
        for marker in ["::core::ops::Drop", "std::ops::Drop", "::std::ops::Drop"] {
            let declaration = TypeDeclaration::new("app::Service")
                .implements(marker)
                .implements("app::IFoo")
                .with_attribute("Scoped");
            assert_eq!(contract_of(&declaration).as_deref(), Some("app::IFoo"), "{marker}");

            let declaration = TypeDeclaration::new("app::Service").implements(marker).with_attribute("Scoped");
            assert_eq!(contract_of(&declaration), None, "{marker}");
        }
    }

    #[test]
    fn test_excluded_contracts_skipped() {
        let interpreter = interpreter().excluding(
            ["core::default::Default", "core::convert::From"].map(|contract| TypeIdentity::parse(contract).unwrap()),
        );

        let declaration = TypeDeclaration::new("app::Service")
            .implements("core::default::Default")
            .implements("std::convert::From<u8>")
            .implements("app::IFoo")
            .with_attribute("scoped");
        let bindings = interpreter.interpret_candidate(&declaration, &MetadataResolver).unwrap();
        assert_eq!(bindings[0].contract.as_ref().map(TypeIdentity::name), Some("app::IFoo"));

        let declaration = TypeDeclaration::new("app::Value")
            .implements("::std::default::Default")
            .with_attribute("transient");
        let bindings = interpreter.interpret_candidate(&declaration, &MetadataResolver).unwrap();
        assert_eq!(bindings[0].contract, None);
    }

    #[test]
    fn test_self_registration_fallback() {
        let declaration = TypeDeclaration::new("app::Logger").with_attribute("singleton");
        assert_eq!(contract_of(&declaration), None);

        let declaration = TypeDeclaration::new("app::Logger")
            .implements("core::ops::Drop")
            .with_attribute("singleton");
        assert_eq!(contract_of(&declaration), None);
    }

    #[test]
    fn test_binding_per_lifetime_attribute() {
        let declaration = TypeDeclaration::new("app::Cache")
            .implements("app::ICache")
            .with_attribute("singleton")
            .with_attribute("derive")
            .with_attribute("scoped")
            .with_attribute("singleton");

        let bindings = interpreter().interpret_candidate(&declaration, &MetadataResolver).unwrap();
        assert_eq!(
            bindings.iter().map(|binding| binding.lifetime).collect::<Vec<_>>(),
            [LifetimeTag::Singleton, LifetimeTag::Scoped, LifetimeTag::Singleton]
        );
        assert!(bindings
            .iter()
            .all(|binding| binding.implementation.name() == "app::Cache" && binding.contract.as_ref().unwrap().name() == "app::ICache"));
    }

    #[test]
    fn test_unrelated_attributes_produce_nothing() {
        let declaration = TypeDeclaration::new("app::Dto")
            .implements("app::IDto")
            .with_attribute("derive")
            .with_attribute("doc")
            .with_attribute("ServiceAttribute");

        let bindings = interpreter().interpret_candidate(&declaration, &MetadataResolver).unwrap();
        assert!(bindings.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_unresolved_candidate_skipped() {
        let broken = TypeDeclaration::new("app::<Broken").with_attribute("scoped");
        let fine = TypeDeclaration::new("app::Fine").with_attribute("transient");

        assert!(interpreter().interpret_candidate(&broken, &MetadataResolver).is_none());

        let registrations = interpreter().interpret([&broken, &fine], &MetadataResolver);
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations.as_slice()[0].implementation.name(), "app::Fine");

        assert!(logs_contain("Candidate skipped: unresolved"));
    }

    #[test]
    fn test_custom_resolver() {
        struct Named(&'static str);

        impl Declaration for Named {
            fn name(&self) -> &str {
                self.0
            }

            fn has_attributes(&self) -> bool {
                true
            }
        }

        let resolver = |declaration: &Named| {
            (declaration.0 != "unknown").then(|| TypeSymbol {
                identity: TypeIdentity::parse(&format!("canned::{}", declaration.0)).unwrap(),
                attributes: vec![AttributeRef::new("Scoped")],
                interfaces: vec![],
            })
        };

        let candidates = [Named("A"), Named("unknown"), Named("B")];
        let registrations = interpreter().interpret(&candidates, &resolver);
        assert_eq!(
            registrations.iter().map(|binding| binding.implementation.name()).collect::<Vec<_>>(),
            ["canned::A", "canned::B"]
        );
    }
}
