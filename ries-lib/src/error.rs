use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RiesError {
    UnknownState(String),
    UnknownIsotope(String),
    UnknownElement(String),
    UnknownTransition { from: String, to: String },
    InvalidParameter(String),
    InvalidPartition(String),
    CoverageUndefined(String),
    NotImplemented(&'static str),
    DivisionByZero(String),
    RootNotConverged { quantile: f64, iterations: usize },
    DataError(String),
}

pub type Result<T> = std::result::Result<T, RiesError>;

impl fmt::Display for RiesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownState(s) => write!(f, "unknown state: {s}"),
            Self::UnknownIsotope(i) => write!(f, "unknown isotope: {i}"),
            Self::UnknownElement(e) => write!(f, "unknown element: {e}"),
            Self::UnknownTransition { from, to } => {
                write!(f, "no partial width for the transition '{from}' -> '{to}'")
            }
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::InvalidPartition(msg) => write!(f, "invalid partition: {msg}"),
            Self::CoverageUndefined(what) => {
                write!(f, "coverage interval is undefined for {what}")
            }
            Self::NotImplemented(what) => write!(f, "not implemented: {what}"),
            Self::DivisionByZero(msg) => write!(f, "division by zero: {msg}"),
            Self::RootNotConverged {
                quantile,
                iterations,
            } => write!(
                f,
                "root finding for quantile {quantile} did not converge after {iterations} iterations"
            ),
            Self::DataError(msg) => write!(f, "data error: {msg}"),
        }
    }
}

impl std::error::Error for RiesError {}
