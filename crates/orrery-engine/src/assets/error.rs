use thiserror::Error;

/// Failure to obtain the bytes of an asset.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Malformed OBJ / MTL text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("line {line}: bad number in '{text}'")]
    Number { line: usize, text: String },

    #[error("line {line}: expected {expected} values after '{keyword}'")]
    Arity { line: usize, keyword: &'static str, expected: usize },

    #[error("line {line}: face index {index} out of range")]
    Index { line: usize, index: i64 },

    #[error("'{keyword}' before any 'newmtl' on line {line}")]
    NoMaterial { line: usize, keyword: String },
}

/// Why one stage of a load failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StageError {
    #[error(transparent)]
    Fetch(#[from] AssetError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Outcome of a failed two-stage body load.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("material library {file}: {source}")]
    Material {
        file: String,
        #[source]
        source: StageError,
    },

    #[error("geometry {file}: {source}")]
    Geometry {
        file: String,
        #[source]
        source: StageError,
    },
}

impl LoadError {
    pub fn is_material(&self) -> bool {
        matches!(self, LoadError::Material { .. })
    }

    /// File name of the stage that failed.
    pub fn file(&self) -> &str {
        match self {
            LoadError::Material { file, .. } | LoadError::Geometry { file, .. } => file,
        }
    }
}
