use std::io;

use thiserror::Error;

/// Broad classes of failure, used by callers that only care what went wrong
/// rather than the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// A symbol or rotor name that isn't known.
	Lookup,
	/// Malformed cycle notation.
	Format,
	/// Index outside of the alphabet.
	Index,
	/// The machine, a setting line or the configuration file is inconsistent.
	Configuration,
	Io,
}

#[derive(Debug, Error)]
pub enum EnigmaError {
	#[error("character {0:?} is not in the alphabet")]
	NotInAlphabet(char),

	#[error("no rotor named {0:?}")]
	UnknownRotor(String),

	#[error("index {index} out of range for alphabet of size {size}")]
	IndexOutOfRange { index: usize, size: usize },

	#[error("bad cycle notation: {0}")]
	Cycles(String),

	#[error("character {0:?} appears more than once in the alphabet")]
	DuplicateSymbol(char),

	#[error("character {0:?} may not be used in an alphabet")]
	ReservedSymbol(char),

	#[error("wrong number of moving rotors: expected {expected}, found {found}")]
	MovingRotors { expected: usize, found: usize },

	#[error("expected {expected} rotors, got {found}")]
	RotorCount { expected: usize, found: usize },

	#[error("rotor {0:?} named twice")]
	DuplicateRotor(String),

	#[error("first rotor must be a reflector, got {0:?}")]
	MissingReflector(String),

	#[error("reflector {0:?} is not in the leftmost slot")]
	MisplacedReflector(String),

	#[error("no rotors inserted")]
	NoRotors,

	#[error("{what} {value:?} should have {expected} characters")]
	SettingLength {
		what: &'static str,
		value: String,
		expected: usize,
	},

	#[error("{0}")]
	Config(String),

	#[error("{0}")]
	Input(String),

	#[error(transparent)]
	Io(#[from] io::Error),
}

impl EnigmaError {
	pub fn kind(&self) -> ErrorKind {
		use EnigmaError::*;

		match self {
			NotInAlphabet(_) | UnknownRotor(_) => ErrorKind::Lookup,
			Cycles(_) => ErrorKind::Format,
			IndexOutOfRange { .. } => ErrorKind::Index,
			Io(_) => ErrorKind::Io,
			DuplicateSymbol(_)
			| ReservedSymbol(_)
			| MovingRotors { .. }
			| RotorCount { .. }
			| DuplicateRotor(_)
			| MissingReflector(_)
			| MisplacedReflector(_)
			| NoRotors
			| SettingLength { .. }
			| Config(_)
			| Input(_) => ErrorKind::Configuration,
		}
	}
}

pub type Result<T> = std::result::Result<T, EnigmaError>;
