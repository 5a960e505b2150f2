use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Ident, Path};
use tracing::{debug, warn};

use crate::{
    binding::{GeneratedRegistrationSet, ServiceBinding},
    config::Config,
    errors::ConfigError,
};

/// Marks the generated unit for tools and readers
pub const GENERATED_HEADER: &str = "// @generated by autoreg-codegen. Do not edit.\n\n";

/// Generated source unit handed back to the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSource {
    pub file_name: String,
    pub text: String,
}

/// Rendering convention of the target container integration.
///
/// Implementations must render every binding, in order, without sorting, deduplicating or validating them.
pub trait Renderer {
    #[must_use]
    fn render(&self, registrations: &GeneratedRegistrationSet) -> String;
}

/// Renders registrations as a Rust function calling [`autoreg::ServiceRegistrar`]-like methods:
/// `registrar.register::<dyn Contract, Implementation>(Lifetime::Tag)` with a contract
/// and `registrar.register_self::<Implementation>(Lifetime::Tag)` without one.
///
/// [`autoreg::ServiceRegistrar`]: https://docs.rs/autoreg
#[derive(Clone, Debug)]
pub struct RustRenderer {
    entry_point: Ident,
    registrar_trait: Path,
    lifetime_enum: Path,
}

impl RustRenderer {
    /// # Errors
    /// Returns an error if the entry point isn't an identifier or the integration paths aren't paths
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let entry_point = syn::parse_str::<Ident>(&config.entry_point).map_err(|_| ConfigError::InvalidIdent {
            field: "entry_point",
            value: config.entry_point.clone(),
        })?;

        Ok(Self {
            entry_point,
            registrar_trait: parse_path("registrar_trait", &config.registrar_trait)?,
            lifetime_enum: parse_path("lifetime_enum", &config.lifetime_enum)?,
        })
    }

    fn statement(&self, binding: &ServiceBinding) -> TokenStream {
        let implementation = binding.implementation.path();
        let lifetime_enum = &self.lifetime_enum;
        let lifetime = format_ident!("{}", binding.lifetime.name());

        match &binding.contract {
            Some(contract) => {
                let contract = contract.path();
                quote! {
                    registrar.register::<dyn #contract, #implementation>(#lifetime_enum::#lifetime);
                }
            }
            None => quote! {
                registrar.register_self::<#implementation>(#lifetime_enum::#lifetime);
            },
        }
    }
}

impl Default for RustRenderer {
    fn default() -> Self {
        Self {
            entry_point: format_ident!("register_services"),
            registrar_trait: syn::parse_quote!(::autoreg::ServiceRegistrar),
            lifetime_enum: syn::parse_quote!(::autoreg::Lifetime),
        }
    }
}

impl Renderer for RustRenderer {
    fn render(&self, registrations: &GeneratedRegistrationSet) -> String {
        let entry_point = &self.entry_point;
        let registrar_trait = &self.registrar_trait;
        let statements = registrations.iter().map(|binding| self.statement(binding));

        let tokens = quote! {
            #[allow(unused_variables)]
            pub fn #entry_point<R: #registrar_trait>(registrar: &mut R) {
                #( #statements )*
            }
        };

        let body = match syn::parse2::<syn::File>(tokens.clone()) {
            Ok(file) => prettyplease::unparse(&file),
            Err(err) => {
                warn!(%err, "Generated tokens aren't a valid file, emitting them unformatted");
                let mut raw = tokens.to_string();
                raw.push('\n');
                raw
            }
        };

        [GENERATED_HEADER, &body].concat()
    }
}

/// Renders the whole registration set into one source unit
#[must_use]
pub fn emit<R>(registrations: &GeneratedRegistrationSet, renderer: &R, file_name: &str) -> GeneratedSource
where
    R: Renderer + ?Sized,
{
    debug!(bindings = registrations.len(), file_name, "Emitting registrations");

    GeneratedSource {
        file_name: file_name.to_owned(),
        text: renderer.render(registrations),
    }
}

fn parse_path(field: &'static str, value: &str) -> Result<Path, ConfigError> {
    syn::parse_str::<Path>(value).map_err(|_| ConfigError::InvalidPath {
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::{emit, Renderer, RustRenderer, GENERATED_HEADER};
    use crate::{Config, ConfigError, GeneratedRegistrationSet, LifetimeTag, ServiceBinding, TypeIdentity};

    fn binding(implementation: &str, contract: Option<&str>, lifetime: LifetimeTag) -> ServiceBinding {
        ServiceBinding {
            implementation: TypeIdentity::parse(implementation).unwrap(),
            contract: contract.map(|contract| TypeIdentity::parse(contract).unwrap()),
            lifetime,
        }
    }

    /// Drops formatting (whitespace and the trailing commas of wrapped lists)
    /// so assertions don't depend on line breaking
    fn squash(text: &str) -> String {
        text.chars()
            .filter(|ch| !ch.is_whitespace())
            .collect::<String>()
            .replace(",>", ">")
            .replace(",)", ")")
    }

    #[test]
    fn test_render_statements_in_order() {
        let registrations = GeneratedRegistrationSet::from_iter([
            binding("crate::UserService", Some("crate::IUserService"), LifetimeTag::Scoped),
            binding("crate::Logger", None, LifetimeTag::Singleton),
            binding("crate::Clock", Some("crate::time::IClock"), LifetimeTag::Transient),
        ]);

        let text = RustRenderer::default().render(&registrations);
        let expected = "
            #[allow(unused_variables)]
            pub fn register_services<R: ::autoreg::ServiceRegistrar>(registrar: &mut R) {
                registrar.register::<dyn crate::IUserService, crate::UserService>(::autoreg::Lifetime::Scoped);
                registrar.register_self::<crate::Logger>(::autoreg::Lifetime::Singleton);
                registrar.register::<dyn crate::time::IClock, crate::Clock>(::autoreg::Lifetime::Transient);
            }
        ";

        assert!(text.starts_with(GENERATED_HEADER));
        assert_eq!(squash(&text[GENERATED_HEADER.len()..]), squash(expected));
    }

    #[test]
    fn test_render_is_deterministic() {
        let registrations = GeneratedRegistrationSet::from_iter([
            binding("crate::B", Some("crate::IB"), LifetimeTag::Transient),
            binding("crate::A", None, LifetimeTag::Scoped),
        ]);

        let renderer = RustRenderer::default();
        assert_eq!(renderer.render(&registrations), renderer.render(&registrations.clone()));
    }

    #[test]
    fn test_render_keeps_duplicates() {
        let registrations = GeneratedRegistrationSet::from_iter([
            binding("crate::Cache", None, LifetimeTag::Singleton),
            binding("crate::Cache", None, LifetimeTag::Singleton),
        ]);

        let text = squash(&RustRenderer::default().render(&registrations));
        assert_eq!(
            text.matches("registrar.register_self::<crate::Cache>(::autoreg::Lifetime::Singleton);").count(),
            2
        );
    }

    #[test]
    fn test_render_empty() {
        let text = RustRenderer::default().render(&GeneratedRegistrationSet::new());
        assert!(text.starts_with(GENERATED_HEADER));
        assert_eq!(
            squash(&text[GENERATED_HEADER.len()..]),
            squash("#[allow(unused_variables)] pub fn register_services<R: ::autoreg::ServiceRegistrar>(registrar: &mut R) {}")
        );
    }

    #[test]
    fn test_renderer_from_config() {
        let config = Config {
            entry_point: "add_auto_services".to_owned(),
            registrar_trait: "crate::di::Registrar".to_owned(),
            lifetime_enum: "crate::di::Lifetime".to_owned(),
            ..Config::default()
        };
        let renderer = RustRenderer::from_config(&config).unwrap();
        let registrations = GeneratedRegistrationSet::from_iter([binding("crate::Logger", None, LifetimeTag::Scoped)]);

        let source = emit(&registrations, &renderer, &config.file_name);
        assert_eq!(source.file_name, "registrations.rs");

        let text = squash(&source.text);
        assert!(text.contains("pubfnadd_auto_services<R:crate::di::Registrar>(registrar:&mutR){"));
        assert!(text.contains("registrar.register_self::<crate::Logger>(crate::di::Lifetime::Scoped);"));
    }

    #[test]
    fn test_renderer_rejects_bad_config() {
        let config = Config {
            entry_point: "add services".to_owned(),
            ..Config::default()
        };
        assert_eq!(
            RustRenderer::from_config(&config).unwrap_err(),
            ConfigError::InvalidIdent {
                field: "entry_point",
                value: "add services".to_owned(),
            }
        );

        let config = Config {
            lifetime_enum: "::".to_owned(),
            ..Config::default()
        };
        assert!(matches!(
            RustRenderer::from_config(&config),
            Err(ConfigError::InvalidPath { field: "lifetime_enum", .. })
        ));
    }
}
