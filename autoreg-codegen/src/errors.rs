#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Failed to parse document `{document}`: {source}")]
    Parse {
        document: String,
        #[source]
        source: syn::Error,
    },
    #[error("Invalid module path `{path}`. Expected `::`-separated identifiers or an empty path for the crate root")]
    InvalidModulePath { path: String },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config field `{field}` must be an identifier, got `{value}`")]
    InvalidIdent { field: &'static str, value: String },
    #[error("Config field `{field}` must be a path, got `{value}`")]
    InvalidPath { field: &'static str, value: String },
}
