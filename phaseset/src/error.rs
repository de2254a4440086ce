//! Module containing the universal error type
use thiserror::Error;

/// Universal error type for phase assignment and tessellation
#[derive(Error, Debug)]
pub enum Error {
    /// Phase table edit has the wrong number of entries
    #[error("phase table edit has {actual} entries; expected {expected}")]
    ArityMismatch {
        /// Required entry count (`2^n` for `n` active geometries)
        expected: usize,
        /// Number of entries supplied
        actual: usize,
    },

    /// Too many geometries
    #[error("cannot define more than {0} geometries")]
    CapacityExceeded(usize),

    /// Geometry index is not active
    #[error("geometry {0} is not defined")]
    BadGeometry(usize),

    /// Grid resolution is too small to form a strip
    #[error("grid resolution must be at least 2 (got {0})")]
    BadResolution(usize),

    /// Domain bounds are empty, inverted, or not finite
    #[error("bad domain bounds: [{lower}, {upper}] on the {axis} axis")]
    BadBounds {
        /// Axis name (`x` or `z`)
        axis: char,
        /// Lower bound
        lower: f32,
        /// Upper bound
        upper: f32,
    },

    /// Only 2D level sets can be tessellated
    #[error("{0}D level sets are not supported")]
    UnsupportedDimension(u8),

    /// Expression did not evaluate to a number
    #[error("expression returned `{0}`, not a number")]
    NotANumber(String),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Rhai error; see inner code for details
    #[cfg(feature = "rhai")]
    #[error("Rhai parse error: {0}")]
    RhaiParseError(#[from] rhai::ParseError),

    /// Rhai error; see inner code for details
    #[cfg(feature = "rhai")]
    #[error("Rhai evaluation error: {0}")]
    RhaiEvalError(#[from] rhai::EvalAltResult),
}

impl Error {
    /// Checks whether this is a domain error (a degenerate tessellation grid)
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Error::BadResolution(..) | Error::BadBounds { .. })
    }
}

#[cfg(feature = "rhai")]
impl From<Box<rhai::EvalAltResult>> for Error {
    fn from(e: Box<rhai::EvalAltResult>) -> Self {
        Error::RhaiEvalError(*e)
    }
}
