//! Front-end for Rust sources, built on [`syn`].
//!
//! Documents are parsed files placed at a module path. A [`SourceTree`] flattens them into
//! declarations and indexes the trait impls, and a [`SourceResolver`] resolves declarations
//! through the module scopes.

mod scope;
mod tree;

pub use tree::{SourceDeclaration, SourceResolver, SourceTree};

use syn::{File, Ident};

use crate::errors::SourceError;

/// Parsed Rust file and the module path it sits at
#[derive(Clone, Debug)]
pub struct SourceDocument {
    module: Vec<String>,
    file: File,
}

impl SourceDocument {
    /// Parses `text` as the file of `module_path`.
    ///
    /// `module_path` is relative to the crate root: `""` (or `crate`) is the root file,
    /// `services::users` is the file of that nested module.
    ///
    /// # Errors
    /// Returns an error if the module path is invalid or the text isn't a Rust file
    pub fn parse(module_path: &str, text: &str) -> Result<Self, SourceError> {
        let module = parse_module_path(module_path)?;
        let file = syn::parse_file(text).map_err(|source| SourceError::Parse {
            document: display_module(&module),
            source,
        })?;

        Ok(Self { module, file })
    }

    /// # Errors
    /// Returns an error if the module path is invalid
    pub fn from_file(module_path: &str, file: File) -> Result<Self, SourceError> {
        Ok(Self {
            module: parse_module_path(module_path)?,
            file,
        })
    }

    /// Module path of the document, e.g. `crate::services`
    #[must_use]
    pub fn name(&self) -> String {
        display_module(&self.module)
    }

    #[inline]
    #[must_use]
    pub(crate) fn module(&self) -> &[String] {
        &self.module
    }

    #[inline]
    #[must_use]
    pub(crate) fn file(&self) -> &File {
        &self.file
    }
}

fn parse_module_path(path: &str) -> Result<Vec<String>, SourceError> {
    let path = path.trim();
    let path = path
        .strip_prefix("crate")
        .filter(|rest| rest.is_empty() || rest.starts_with("::"))
        .map_or(path, |rest| rest.trim_start_matches("::"));
    if path.is_empty() {
        return Ok(Vec::new());
    }

    path.split("::")
        .map(|name| {
            let name = name.trim();
            match syn::parse_str::<Ident>(name) {
                Ok(_) => Ok(name.to_owned()),
                Err(_) => Err(SourceError::InvalidModulePath { path: path.to_owned() }),
            }
        })
        .collect()
}

fn display_module(module: &[String]) -> String {
    core::iter::once("crate").chain(module.iter().map(String::as_str)).collect::<Vec<_>>().join("::")
}
