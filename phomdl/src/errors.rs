//! Definition of errors.
use std::error::Error;
use std::fmt;

/// A specialized Result type for phomdl.
pub type Result<T, E = PhoMdlError> = std::result::Result<T, E>;

/// The error taxonomy of the system (spec §7).
///
/// Mutation failures are never represented here: they are local and expected,
/// and are surfaced as `bool`/`Option` returns instead. `EnergyInfinite` is
/// likewise not an error variant; it is surfaced as `f64::INFINITY` in the
/// energy scalar so the annealer can simply reject the neighbor.
#[derive(Debug)]
pub enum PhoMdlError {
    /// Missing configuration key, out-of-range value, or inconsistent bounds.
    Configuration(String),

    /// Duplicate feature label, symbol arity mismatch, or illegal value in a
    /// feature-table file.
    FeatureTable(String),

    /// Unknown constraint name, malformed bundle, or too many bundles.
    ConstraintFormat(String),

    /// Cost-vector length mismatch, an arc referencing an unknown state, or
    /// an empty intersection where a non-empty one was required.
    Transducer(String),

    /// The error variant for [`std::io::Error`].
    StdIo(std::io::Error),

    /// The error variant for [`serde_json::Error`].
    Json(serde_json::Error),

    /// The error variant for [`csv::Error`], raised while loading a
    /// feature table's CSV form.
    Csv(csv::Error),
}

impl fmt::Display for PhoMdlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "ConfigurationError: {msg}"),
            Self::FeatureTable(msg) => write!(f, "FeatureTableError: {msg}"),
            Self::ConstraintFormat(msg) => write!(f, "ConstraintFormatError: {msg}"),
            Self::Transducer(msg) => write!(f, "TransducerError: {msg}"),
            Self::StdIo(e) => e.fmt(f),
            Self::Json(e) => e.fmt(f),
            Self::Csv(e) => e.fmt(f),
        }
    }
}

impl Error for PhoMdlError {}

impl PhoMdlError {
    pub(crate) fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn feature_table<S: Into<String>>(msg: S) -> Self {
        Self::FeatureTable(msg.into())
    }

    pub(crate) fn constraint_format<S: Into<String>>(msg: S) -> Self {
        Self::ConstraintFormat(msg.into())
    }

    /// Constructs a [`PhoMdlError::Transducer`].
    ///
    /// Transducer invariant violations indicate a programmer bug; callers
    /// should treat this as abort-with-context rather than a recoverable
    /// condition (spec §7 propagation policy).
    pub fn transducer<S: Into<String>>(msg: S) -> Self {
        Self::Transducer(msg.into())
    }
}

impl From<std::io::Error> for PhoMdlError {
    fn from(error: std::io::Error) -> Self {
        Self::StdIo(error)
    }
}

impl From<serde_json::Error> for PhoMdlError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<csv::Error> for PhoMdlError {
    fn from(error: csv::Error) -> Self {
        Self::Csv(error)
    }
}
