use std::fmt;

pub type ClassificationResult<T> = std::result::Result<T, LoweringError>;

// Classification must never approximate a calling convention decision it does
// not actually implement, a wrong shape corrupts binary compatibility with no
// visible symptom at the classification site. Unimplemented paths fail with a
// value the caller can surface or abort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoweringError {
	Unsupported { feature: &'static str },
}

impl fmt::Display for LoweringError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			LoweringError::Unsupported { feature } => {
				write!(f, "{feature} are not implemented for this target")
			}
		}
	}
}

impl std::error::Error for LoweringError {}

#[macro_export]
macro_rules! unsupported {
	($feature:expr) => {
		return Err($crate::error::LoweringError::Unsupported { feature: $feature })
	};
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	UnknownTriple(String),
	UnknownAbiKind(String),
	UnknownEndianness(String),
	MalformedTable(String),
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			ConfigError::UnknownTriple(triple) => write!(f, "Unknown target triple {triple:?}"),
			ConfigError::UnknownAbiKind(name) => write!(f, "Unknown abi kind {name:?}"),
			ConfigError::UnknownEndianness(name) => write!(f, "Unknown endianness {name:?}"),
			ConfigError::MalformedTable(message) => write!(f, "Malformed target table: {message}"),
		}
	}
}

impl std::error::Error for ConfigError {}
