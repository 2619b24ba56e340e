use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Db(#[from] alchemy_store_db::Error),

    #[error("Catalog task failed: {reason}")]
    Task { reason: String },
}

/// Rejected form submissions. The messages are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Author name is required.")]
    MissingAuthorName,

    #[error("Invalid {field} '{value}', expected YYYY-MM-DD.")]
    InvalidDate { field: &'static str, value: String },

    #[error("Title, ISBN and author are required.")]
    MissingBookFields,

    #[error("Publication year must be a whole number, got '{0}'.")]
    InvalidYear(String),

    #[error("Selected author '{0}' is not a valid author id.")]
    InvalidAuthorId(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The catalog rejected the request because of the submitted data
    /// (duplicate key, unknown author or book).
    pub fn rejection(&self) -> Option<&alchemy_store_db::Error> {
        match self {
            AppError::Catalog(CatalogError::Db(e)) if e.is_rejection() => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::Catalog(CatalogError::Db(
                alchemy_store_db::Error::BookNotFound(_) | alchemy_store_db::Error::AuthorNotFound(_)
            ))
        )
    }
}

impl From<alchemy_store_db::Error> for AppError {
    fn from(err: alchemy_store_db::Error) -> Self {
        AppError::Catalog(CatalogError::Db(err))
    }
}

/// Extension trait for adding context to IO errors
pub trait IoErrorContext<T> {
    fn io_context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> IoErrorContext<T> for std::result::Result<T, std::io::Error> {
    fn io_context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AppError::Io {
            context: context.into(),
            source: e,
        })
    }
}
