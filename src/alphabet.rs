use std::fmt;
use std::str::FromStr;

use crate::error::{EnigmaError, Result};

/// The upper-case Latin letters, used by `Alphabet::default()`.
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of encodable characters. Character number `k` has index `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
	chars: Vec<char>,
}

/// Characters that carry meaning in cycle notation or on setting lines.
fn is_reserved(c: char) -> bool {
	c.is_whitespace() || matches!(c, '(' | ')' | '*' | ',')
}

impl Alphabet {
	pub fn new(chars: &str) -> Result<Alphabet> {
		let mut v: Vec<char> = Vec::with_capacity(chars.len());
		for c in chars.chars() {
			if is_reserved(c) {
				return Err(EnigmaError::ReservedSymbol(c));
			}
			if v.contains(&c) {
				return Err(EnigmaError::DuplicateSymbol(c));
			}
			v.push(c);
		}

		Ok(Alphabet { chars: v })
	}

	pub fn size(&self) -> usize {
		self.chars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	pub fn contains(&self, c: char) -> bool {
		self.chars.contains(&c)
	}

	/// Character number `index`, where `0 <= index < size()`.
	pub fn to_char(&self, index: usize) -> Result<char> {
		self.chars.get(index).copied().ok_or(EnigmaError::IndexOutOfRange {
			index,
			size: self.size(),
		})
	}

	/// Index of `c`; the inverse of `to_char`.
	pub fn to_int(&self, c: char) -> Result<usize> {
		self.chars
			.iter()
			.position(|&x| x == c)
			.ok_or(EnigmaError::NotInAlphabet(c))
	}

	pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
		self.chars.iter().copied()
	}
}

impl Default for Alphabet {
	fn default() -> Alphabet {
		Alphabet { chars: UPPER.chars().collect() }
	}
}

impl FromStr for Alphabet {
	type Err = EnigmaError;

	fn from_str(s: &str) -> Result<Alphabet> {
		Alphabet::new(s)
	}
}

impl fmt::Display for Alphabet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for c in &self.chars {
			write!(f, "{}", c)?;
		}
		Ok(())
	}
}
