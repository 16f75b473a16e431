use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// A permutation of the indices `0..size` of an alphabet, given in cycle
/// notation. Indices that appear in no cycle map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
	alphabet: Arc<Alphabet>,
	cycles: Vec<Vec<usize>>,
	forward: Vec<usize>,	// i -> successor of i
	backward: Vec<usize>,	// i -> predecessor of i
}

fn is_separator(c: char) -> bool {
	c.is_whitespace() || c == ','
}

/// Splits `(ab c) (de) ...` into cycles of alphabet indices.
fn parse_cycles(s: &str, alphabet: &Alphabet) -> Result<Vec<Vec<usize>>> {
	let mut cycles = Vec::new();
	let mut seen = vec![false; alphabet.size()];
	let mut current: Option<Vec<usize>> = None;

	for c in s.chars() {
		if is_separator(c) {
			continue;
		}

		match (c, current.as_mut()) {
			('(', None) => current = Some(Vec::new()),
			('(', Some(_)) => return Err(EnigmaError::Cycles(format!("nested '(' in {:?}", s))),
			(')', None) => return Err(EnigmaError::Cycles(format!("unmatched ')' in {:?}", s))),
			(')', Some(cycle)) => {
				if cycle.is_empty() {
					return Err(EnigmaError::Cycles(format!("empty cycle in {:?}", s)));
				}
				cycles.push(std::mem::take(cycle));
				current = None;
			}
			(_, None) => {
				return Err(EnigmaError::Cycles(format!("{:?} is outside of a cycle in {:?}", c, s)));
			}
			(_, Some(cycle)) => {
				let i = alphabet.to_int(c)?;
				if seen[i] {
					return Err(EnigmaError::Cycles(format!("{:?} appears more than once in {:?}", c, s)));
				}
				seen[i] = true;
				cycle.push(i);
			}
		}
	}

	if current.is_some() {
		return Err(EnigmaError::Cycles(format!("unclosed '(' in {:?}", s)));
	}

	Ok(cycles)
}

impl Permutation {
	/// Parses `cycles`, a string of the form `(cccc) (cc) ...` over the characters
	/// of `alphabet`. Whitespace and commas are ignored; an empty string is the
	/// identity.
	pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Permutation> {
		let cycles = parse_cycles(cycles, &alphabet)?;
		Ok(Permutation::from_cycles(alphabet, cycles))
	}

	pub fn identity(alphabet: Arc<Alphabet>) -> Permutation {
		Permutation::from_cycles(alphabet, Vec::new())
	}

	fn from_cycles(alphabet: Arc<Alphabet>, cycles: Vec<Vec<usize>>) -> Permutation {
		let mut forward: Vec<usize> = (0..alphabet.size()).collect();
		let mut backward = forward.clone();

		for cycle in &cycles {
			for (k, &from) in cycle.iter().enumerate() {
				let to = cycle[(k + 1) % cycle.len()];
				forward[from] = to;
				backward[to] = from;
			}
		}

		Permutation { alphabet, cycles, forward, backward }
	}

	pub fn size(&self) -> usize {
		self.alphabet.size()
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	/// `p` modulo `size()`, always in `0..size()`. An empty alphabet wraps
	/// everything to 0.
	pub fn wrap(&self, p: isize) -> usize {
		match self.size() {
			0 => 0,
			n => p.rem_euclid(n as isize) as usize,
		}
	}

	pub fn permute(&self, p: isize) -> usize {
		let i = self.wrap(p);
		self.forward.get(i).copied().unwrap_or(i)
	}

	pub fn invert(&self, c: isize) -> usize {
		let i = self.wrap(c);
		self.backward.get(i).copied().unwrap_or(i)
	}

	pub fn permute_char(&self, p: char) -> Result<char> {
		let i = self.alphabet.to_int(p)?;
		self.alphabet.to_char(self.forward[i])
	}

	pub fn invert_char(&self, c: char) -> Result<char> {
		let i = self.alphabet.to_int(c)?;
		self.alphabet.to_char(self.backward[i])
	}

	/// True iff no index maps to itself and the cycles cover the alphabet.
	pub fn derangement(&self) -> bool {
		let covered: usize = self.cycles.iter().map(Vec::len).sum();
		covered == self.size() && self.cycles.iter().all(|c| c.len() >= 2)
	}

	/// True iff applying the permutation twice is the identity, as a plugboard's
	/// wiring should be.
	pub fn is_involution(&self) -> bool {
		self.cycles.iter().all(|c| c.len() <= 2)
	}

	pub fn cycles(&self) -> &[Vec<usize>] {
		&self.cycles
	}
}

impl fmt::Display for Permutation {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (n, cycle) in self.cycles.iter().enumerate() {
			if n > 0 {
				write!(f, " ")?;
			}
			write!(f, "(")?;
			for &i in cycle {
				let c = self.alphabet.to_char(i).map_err(|_| fmt::Error)?;
				write!(f, "{}", c)?;
			}
			write!(f, ")")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::alphabet::UPPER;
	use crate::error::ErrorKind;

	fn perm(cycles: &str, alpha: &str) -> Permutation {
		Permutation::new(cycles, Arc::new(Alphabet::new(alpha).unwrap())).unwrap()
	}

	#[test]
	fn identity() {
		let p = perm("", UPPER);
		assert_eq!(p.size(), 26);
		assert!(p.cycles().is_empty());
		for (i, c) in UPPER.chars().enumerate() {
			assert_eq!(p.permute_char(c).unwrap(), c);
			assert_eq!(p.invert_char(c).unwrap(), c);
			assert_eq!(p.permute(i as isize), i);
			assert_eq!(p.invert(i as isize), i);
		}
		assert!(!p.derangement());
	}

	#[test]
	fn single_cycle() {
		let p = perm("(BACD)", "ABCD");
		assert_eq!(p.invert_char('A').unwrap(), 'B');
		assert_eq!(p.permute_char('B').unwrap(), 'A');
		assert_eq!(p.invert_char('B').unwrap(), 'D');
		assert_eq!(p.permute_char('D').unwrap(), 'B');
		assert_eq!(p.invert_char('D').unwrap(), 'C');
		assert_eq!(p.permute_char('C').unwrap(), 'D');
		assert_eq!(p.size(), 4);
		assert_eq!(p.permute(1), 0);
		assert_eq!(p.invert(0), 1);
		assert_eq!(p.permute(-1), 1);
		assert_eq!(p.permute(6), 3);
		assert_eq!(p.invert(3), 2);
		assert_eq!(p.invert(1), 3);
		assert!(p.derangement());
	}

	#[test]
	fn one_letter() {
		let p = perm("(A)", "A");
		assert_eq!(p.invert_char('A').unwrap(), 'A');
		assert_eq!(p.permute_char('A').unwrap(), 'A');
		assert_eq!(p.size(), 1);
		assert_eq!(p.permute(6), 0);
		assert_eq!(p.permute(-6), 0);
		assert!(!p.derangement());
	}

	#[test]
	fn empty_alphabet() {
		let p = perm("", "");
		assert_eq!(p.size(), 0);
		assert_eq!(p.wrap(-3), 0);
		assert!(p.derangement());
	}

	#[test]
	fn fixed_point_is_not_derangement() {
		assert!(!perm("(BAC)", "ABCD").derangement());
		assert!(!perm("(BA) (C) (D)", "ABCD").derangement());
		assert!(perm("(BA) (CD)", "ABCD").derangement());
	}

	#[test]
	fn wrap_is_never_negative() {
		let p = perm("", "ABCDE");
		assert_eq!(p.wrap(-1), 4);
		assert_eq!(p.wrap(-5), 0);
		assert_eq!(p.wrap(-11), 4);
		assert_eq!(p.wrap(12), 2);
	}

	#[test]
	fn separators_are_ignored() {
		let p = perm("(A B, C)(D  E)", "ABCDEF");
		assert_eq!(p.permute_char('A').unwrap(), 'B');
		assert_eq!(p.permute_char('C').unwrap(), 'A');
		assert_eq!(p.permute_char('E').unwrap(), 'D');
		assert_eq!(p.permute_char('F').unwrap(), 'F');
		assert_eq!(p.cycles(), [vec![0, 1, 2], vec![3, 4]]);
		assert_eq!(p.to_string(), "(ABC) (DE)");
	}

	#[test]
	fn malformed() {
		let a = Arc::new(Alphabet::default());
		for bad in ["(AB", "AB)", "(A(B))", "(AB) C", "()", "(AB)(BC)", "(ABA)"] {
			let err = Permutation::new(bad, a.clone()).unwrap_err();
			assert_eq!(err.kind(), ErrorKind::Format, "{}", bad);
		}
	}

	#[test]
	fn unknown_symbol() {
		let err = Permutation::new("(Ab)", Arc::new(Alphabet::default())).unwrap_err();
		assert!(matches!(err, EnigmaError::NotInAlphabet('b')));
	}

	#[test]
	fn involution() {
		assert!(perm("(TD) (KC) (JZ)", UPPER).is_involution());
		assert!(perm("", UPPER).is_involution());
		assert!(!perm("(TD) (JAZ)", UPPER).is_involution());
	}
}
