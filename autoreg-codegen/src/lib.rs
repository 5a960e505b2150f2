//! Build-time generator of service registrations.
//!
//! Types tagged with a lifetime attribute (`#[scoped]`, `#[singleton]` or `#[transient]`)
//! are registered under the first trait they implement (other than [`Drop`]),
//! or under themselves when they implement none.
//!
//! ```
//! use autoreg_codegen::{Config, Generator};
//!
//! let generator = Generator::new(Config::default()).unwrap();
//! let source = generator.generate_from_sources([("", "#[autoreg::singleton] pub struct Logger;")]);
//!
//! assert!(source.text.contains("registrar.register_self::<crate::Logger>(::autoreg::Lifetime::Singleton);"));
//! ```

pub(crate) mod binding;
pub(crate) mod collector;
pub(crate) mod config;
pub(crate) mod declaration;
pub(crate) mod emitter;
pub(crate) mod errors;
pub(crate) mod generator;
pub(crate) mod identity;
pub(crate) mod interpreter;
pub(crate) mod lifetime;
pub(crate) mod resolver;

pub mod source;

pub use binding::{GeneratedRegistrationSet, ServiceBinding};
pub use collector::collect_candidates;
pub use config::{Config, DEFAULT_EXCLUDED_CONTRACTS};
pub use declaration::{AttributeRef, Declaration, Document, TypeDeclaration, TypeSymbol};
pub use emitter::{emit, GeneratedSource, Renderer, RustRenderer, GENERATED_HEADER};
pub use errors::{ConfigError, SourceError};
pub use generator::Generator;
pub use identity::TypeIdentity;
pub use interpreter::Interpreter;
pub use lifetime::{LifetimeTag, ATTRIBUTE_SUFFIX};
pub use resolver::{MetadataResolver, SymbolResolver};
