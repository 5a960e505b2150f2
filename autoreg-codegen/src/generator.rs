use syn::Path;
use tracing::{info_span, warn};

use crate::{
    collector::collect_candidates,
    config::Config,
    declaration::{Declaration, Document},
    emitter::{emit, GeneratedSource, Renderer, RustRenderer},
    errors::ConfigError,
    identity::TypeIdentity,
    interpreter::Interpreter,
    resolver::SymbolResolver,
    source::{SourceDocument, SourceResolver, SourceTree},
};

/// Scan → interpret → emit pipeline.
///
/// A generation pass is a pure function of its input: the generator holds no state between passes,
/// and the same declarations always produce the same text.
#[derive(Clone, Debug)]
pub struct Generator {
    config: Config,
    interpreter: Interpreter,
    renderer: RustRenderer,
    crate_root: Path,
}

impl Generator {
    /// # Errors
    /// Returns an error if a config value can't be used in generated code
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let marker = TypeIdentity::parse(&config.marker_contract).ok_or_else(|| ConfigError::InvalidPath {
            field: "marker_contract",
            value: config.marker_contract.clone(),
        })?;
        let excluded = config
            .excluded_contracts
            .iter()
            .map(|contract| {
                TypeIdentity::parse(contract).ok_or_else(|| ConfigError::InvalidPath {
                    field: "excluded_contracts",
                    value: contract.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let crate_root = syn::parse_str::<Path>(&config.crate_root).map_err(|_| ConfigError::InvalidPath {
            field: "crate_root",
            value: config.crate_root.clone(),
        })?;
        let renderer = RustRenderer::from_config(&config)?;

        Ok(Self {
            interpreter: Interpreter::new(marker).excluding(excluded),
            renderer,
            crate_root,
            config,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a pass over declarations resolved by a front-end of the host
    #[must_use]
    pub fn generate<D, R>(&self, documents: &[Document<D>], resolver: &R) -> GeneratedSource
    where
        D: Declaration,
        R: SymbolResolver<D> + ?Sized,
    {
        self.generate_with(documents, resolver, &self.renderer)
    }

    /// Same as [`Generator::generate`], with another rendering convention
    #[must_use]
    pub fn generate_with<D, R, Rn>(&self, documents: &[Document<D>], resolver: &R, renderer: &Rn) -> GeneratedSource
    where
        D: Declaration,
        R: SymbolResolver<D> + ?Sized,
        Rn: Renderer + ?Sized,
    {
        let span = info_span!("generate", documents = documents.len());
        let _guard = span.enter();

        let candidates = collect_candidates(documents);
        let registrations = self.interpreter.interpret(candidates, resolver);

        emit(&registrations, renderer, &self.config.file_name)
    }

    /// Runs a pass over an already built source tree
    #[must_use]
    pub fn generate_from_tree(&self, tree: &SourceTree) -> GeneratedSource {
        let resolver = SourceResolver::new(tree, self.crate_root.clone());
        self.generate(tree.documents(), &resolver)
    }

    /// Parses Rust sources given as `(module path, text)` pairs and runs a pass over them.
    ///
    /// A source that fails to parse is skipped, so its declarations don't produce registrations.
    #[must_use]
    pub fn generate_from_sources<'a, I>(&self, sources: I) -> GeneratedSource
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let documents = sources
            .into_iter()
            .filter_map(|(module_path, text)| match SourceDocument::parse(module_path, text) {
                Ok(document) => Some(document),
                Err(err) => {
                    warn!(%err, module_path, "Document skipped");
                    None
                }
            })
            .collect::<Vec<_>>();

        self.generate_from_tree(&SourceTree::new(&documents))
    }
}
