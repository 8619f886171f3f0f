//! Error types for ferro-annotate
//!
//! Errors carry a category code (see [`ErrorCode`]) so that callers driving
//! a streaming annotation pass can record a per-variant error instead of
//! aborting the whole file.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Variant errors (E1xxx)
    /// Variant structure does not fit the selected builder
    InvalidGenomeVariant = 1001,
    /// Unknown structural variant type code
    UnknownSvType = 1002,
    /// Unknown break-end connection type
    UnknownConnectionType = 1003,
    /// Strand change requested on a structural variant
    StrandChange = 1004,

    // Reference errors (E2xxx)
    /// Chromosome/contig not found in the reference dictionary
    ChromosomeNotFound = 2001,

    // Coordinate errors (E3xxx)
    /// Invalid coordinate range
    InvalidRange = 3001,

    // Annotation errors (E5xxx)
    /// Annotation of a variant failed
    AnnotationFailed = 5001,

    // Setup errors (E9xxx)
    /// Configuration error
    ConfigError = 9001,
    /// File IO error
    IoError = 9002,
    /// JSON parsing error
    JsonError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidGenomeVariant => "variant incompatible with annotation builder",
            ErrorCode::UnknownSvType => "unknown structural variant type",
            ErrorCode::UnknownConnectionType => "unknown break-end connection type",
            ErrorCode::StrandChange => "strand change on structural variant",
            ErrorCode::ChromosomeNotFound => "chromosome not found",
            ErrorCode::InvalidRange => "invalid coordinate range",
            ErrorCode::AnnotationFailed => "variant annotation failed",
            ErrorCode::ConfigError => "configuration error",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-annotate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// The variant cannot be interpreted by the builder it was routed to
    #[error("Invalid genome variant: {msg}")]
    InvalidGenomeVariant { msg: String },

    /// Annotating a single variant failed
    ///
    /// Wraps the underlying error together with the variant and, when known,
    /// the transcript that was being processed.
    #[error("Problem annotating variant {variant}{}: {source}", on_transcript(.transcript))]
    Annotation {
        variant: String,
        transcript: Option<String>,
        source: Box<AnnotateError>,
    },

    /// Chromosome id or name not present in the reference dictionary
    #[error("Could not identify chromosome \"{id}\"")]
    UnknownChromosome { id: String },

    /// Break-end connection type outside of 3to3/3to5/5to3/5to5
    #[error("Unknown connection type {tag}")]
    UnknownConnectionType { tag: String },

    /// Structural variant type code not understood
    #[error("Unknown structural variant type {code}")]
    UnknownSvType { code: String },

    /// Structural variants live on the forward strand only
    #[error("Changing strands is not allowed for structural variants: {variant}")]
    StrandChange { variant: String },

    /// Invalid coordinates provided
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

fn on_transcript(transcript: &Option<String>) -> String {
    transcript
        .as_ref()
        .map(|t| format!(" on {}", t))
        .unwrap_or_default()
}

impl AnnotateError {
    /// Create an [`AnnotateError::InvalidGenomeVariant`]
    pub fn invalid_variant(msg: impl Into<String>) -> Self {
        AnnotateError::InvalidGenomeVariant { msg: msg.into() }
    }

    /// Wrap an error with variant and transcript context
    pub fn annotation(
        variant: impl fmt::Display,
        transcript: Option<&str>,
        source: AnnotateError,
    ) -> Self {
        AnnotateError::Annotation {
            variant: variant.to_string(),
            transcript: transcript.map(str::to_string),
            source: Box::new(source),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            AnnotateError::InvalidGenomeVariant { .. } => ErrorCode::InvalidGenomeVariant,
            AnnotateError::Annotation { .. } => ErrorCode::AnnotationFailed,
            AnnotateError::UnknownChromosome { .. } => ErrorCode::ChromosomeNotFound,
            AnnotateError::UnknownConnectionType { .. } => ErrorCode::UnknownConnectionType,
            AnnotateError::UnknownSvType { .. } => ErrorCode::UnknownSvType,
            AnnotateError::StrandChange { .. } => ErrorCode::StrandChange,
            AnnotateError::InvalidCoordinates { .. } => ErrorCode::InvalidRange,
            AnnotateError::Config { .. } => ErrorCode::ConfigError,
            AnnotateError::Io { .. } => ErrorCode::IoError,
            AnnotateError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// The innermost error of an [`AnnotateError::Annotation`] chain
    pub fn root_cause(&self) -> &AnnotateError {
        match self {
            AnnotateError::Annotation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Unrecoverable data or configuration errors that should stop a run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.root_cause(),
            AnnotateError::UnknownConnectionType { .. }
                | AnnotateError::UnknownSvType { .. }
                | AnnotateError::Config { .. }
        )
    }
}

impl From<std::io::Error> for AnnotateError {
    fn from(e: std::io::Error) -> Self {
        AnnotateError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for AnnotateError {
    fn from(e: serde_json::Error) -> Self {
        AnnotateError::Json { msg: e.to_string() }
    }
}

impl From<toml::de::Error> for AnnotateError {
    fn from(e: toml::de::Error) -> Self {
        AnnotateError::Config { msg: e.to_string() }
    }
}
