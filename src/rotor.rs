use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// What a rotor can do besides carry its wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
	/// Never moves.
	Fixed,
	/// Stepped by a pawl; carries the positions at which it lets the rotor to
	/// its left advance.
	Moving { notches: Vec<usize> },
	/// Sends the signal back through the machine. Never moves.
	Reflector,
}

/// A rotor: a named wiring plus its current setting and ring offset.
///
/// The wiring is shared between clones, the setting and ring are not, so a
/// machine can hand every slot its own copy of a rotor from its pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
	name: String,
	permutation: Arc<Permutation>,
	kind: RotorKind,
	setting: usize,
	ring: usize,
}

impl Rotor {
	fn new(name: &str, permutation: Permutation, kind: RotorKind) -> Rotor {
		Rotor {
			name: name.to_string(),
			permutation: Arc::new(permutation),
			kind,
			setting: 0,
			ring: 0,
		}
	}

	pub fn fixed(name: &str, permutation: Permutation) -> Rotor {
		Rotor::new(name, permutation, RotorKind::Fixed)
	}

	pub fn reflector(name: &str, permutation: Permutation) -> Rotor {
		Rotor::new(name, permutation, RotorKind::Reflector)
	}

	/// A moving rotor whose notches are at the characters of `notches`.
	pub fn moving(name: &str, permutation: Permutation, notches: &str) -> Result<Rotor> {
		let alphabet = permutation.alphabet().clone();
		let notches = notches
			.chars()
			.map(|c| alphabet.to_int(c))
			.collect::<Result<Vec<_>>>()?;

		Ok(Rotor::new(name, permutation, RotorKind::Moving { notches }))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		self.permutation.alphabet()
	}

	pub fn permutation(&self) -> &Permutation {
		&self.permutation
	}

	pub fn kind(&self) -> &RotorKind {
		&self.kind
	}

	pub fn size(&self) -> usize {
		self.permutation.size()
	}

	/// Has a ratchet and can move.
	pub fn rotates(&self) -> bool {
		matches!(self.kind, RotorKind::Moving { .. })
	}

	pub fn reflecting(&self) -> bool {
		matches!(self.kind, RotorKind::Reflector)
	}

	pub fn setting(&self) -> usize {
		self.setting
	}

	pub fn ring(&self) -> usize {
		self.ring
	}

	pub fn set(&mut self, posn: isize) {
		self.setting = self.permutation.wrap(posn);
	}

	pub fn set_char(&mut self, cposn: char) -> Result<()> {
		self.setting = self.alphabet().to_int(cposn)?;
		Ok(())
	}

	pub fn set_alphabet_ring(&mut self, letter: char) -> Result<()> {
		self.ring = self.alphabet().to_int(letter)?;
		Ok(())
	}

	/// Offset between the wiring's contacts and the letter ring.
	fn shift(&self) -> isize {
		self.setting as isize - self.ring as isize
	}

	/// Passes `p` through the wiring, right to left.
	pub fn convert_forward(&self, p: isize) -> usize {
		let contact = self.permutation.permute(p + self.shift());
		self.permutation.wrap(contact as isize - self.shift())
	}

	/// Passes `e` through the inverse wiring, left to right.
	pub fn convert_backward(&self, e: isize) -> usize {
		let contact = self.permutation.invert(e + self.shift());
		self.permutation.wrap(contact as isize - self.shift())
	}

	/// Positioned to let the rotor to the left advance.
	pub fn at_notch(&self) -> bool {
		match &self.kind {
			RotorKind::Moving { notches } => notches.contains(&self.setting),
			_ => false,
		}
	}

	/// Advance one position, if this rotor moves at all.
	pub fn advance(&mut self) {
		if self.rotates() {
			self.setting = self.permutation.wrap(self.setting as isize + 1);
		}
	}
}

impl fmt::Display for Rotor {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Rotor {}", self.name)
	}
}
