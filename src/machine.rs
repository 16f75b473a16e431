use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A complete machine: a pool of available rotors, the rotors currently in
/// its slots and a plugboard.
///
/// Slot 0 holds the reflector, the last slot the fast rotor.
#[derive(Debug, Clone)]
pub struct Machine {
	alphabet: Arc<Alphabet>,
	num_rotors: usize,		// slots, reflector included
	pawls: usize,			// moving rotors
	all_rotors: Vec<Rotor>,	// the pool, never mutated
	rotors: Vec<Rotor>,		// working copies, one per slot
	plugboard: Permutation,
}

impl Machine {
	/// A machine with `1 < num_rotors` slots and `0 <= pawls < num_rotors`
	/// pawls, choosing its rotors from `all_rotors`.
	pub fn new(
		alphabet: Arc<Alphabet>,
		num_rotors: usize,
		pawls: usize,
		all_rotors: Vec<Rotor>,
	) -> Result<Machine> {
		if num_rotors < 2 {
			return Err(EnigmaError::Config(format!(
				"a machine needs at least 2 rotor slots, got {}",
				num_rotors
			)));
		}
		if pawls >= num_rotors {
			return Err(EnigmaError::Config(format!(
				"{} pawls is too many for {} rotor slots",
				pawls, num_rotors
			)));
		}
		for (i, r) in all_rotors.iter().enumerate() {
			if all_rotors[..i].iter().any(|other| other.name() == r.name()) {
				return Err(EnigmaError::Config(format!("rotor {:?} defined twice", r.name())));
			}
			if r.reflecting() && !r.permutation().derangement() {
				warn!(rotor = r.name(), "reflector wiring is not a derangement");
			}
		}

		let plugboard = Permutation::identity(alphabet.clone());
		Ok(Machine {
			alphabet,
			num_rotors,
			pawls,
			all_rotors,
			rotors: Vec::new(),
			plugboard,
		})
	}

	pub fn alphabet(&self) -> &Arc<Alphabet> {
		&self.alphabet
	}

	pub fn num_rotors(&self) -> usize {
		self.num_rotors
	}

	pub fn num_pawls(&self) -> usize {
		self.pawls
	}

	/// Rotors in their slots, reflector first.
	pub fn rotors(&self) -> &[Rotor] {
		&self.rotors
	}

	/// Every rotor this machine can choose from.
	pub fn available_rotors(&self) -> &[Rotor] {
		&self.all_rotors
	}

	pub fn plugboard(&self) -> &Permutation {
		&self.plugboard
	}

	/// Current setting of every slot, reflector first.
	pub fn settings(&self) -> Vec<usize> {
		self.rotors.iter().map(Rotor::setting).collect()
	}

	/// Fills the slots with the rotors named by `names`, reflector first. Each
	/// slot gets its own copy of the rotor, at setting 0 with ring 0.
	pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
		if names.len() != self.num_rotors {
			return Err(EnigmaError::RotorCount {
				expected: self.num_rotors,
				found: names.len(),
			});
		}

		let mut rotors = Vec::with_capacity(names.len());
		for (slot, name) in names.iter().enumerate() {
			let name: &str = name.as_ref();
			if names[..slot].iter().any(|n| n.as_ref() == name) {
				return Err(EnigmaError::DuplicateRotor(name.to_string()));
			}

			let rotor = self
				.all_rotors
				.iter()
				.find(|r| r.name() == name)
				.ok_or_else(|| EnigmaError::UnknownRotor(name.to_string()))?;

			if slot == 0 && !rotor.reflecting() {
				return Err(EnigmaError::MissingReflector(name.to_string()));
			}
			if slot > 0 && rotor.reflecting() {
				return Err(EnigmaError::MisplacedReflector(name.to_string()));
			}
			rotors.push(rotor.clone());
		}

		self.rotors = rotors;
		Ok(())
	}

	/// Applies `per_slot` to slots 1.. with the characters of `s`, which must
	/// have one character per non-reflector slot.
	fn apply<F>(&mut self, what: &'static str, s: &str, mut per_slot: F) -> Result<()>
	where
		F: FnMut(&mut Rotor, char) -> Result<()>,
	{
		let expected = self.num_rotors - 1;
		if s.chars().count() != expected || self.rotors.len() != self.num_rotors {
			return Err(EnigmaError::SettingLength {
				what,
				value: s.to_string(),
				expected,
			});
		}

		for (rotor, c) in self.rotors[1..].iter_mut().zip(s.chars()) {
			per_slot(rotor, c)?;
		}
		Ok(())
	}

	/// Sets the rotors from `setting`, leftmost non-reflector first, then checks
	/// that the machine has one moving rotor per pawl.
	pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
		self.apply("setting", setting, Rotor::set_char)?;

		let found = self.rotors.iter().filter(|r| r.rotates()).count();
		if found != self.pawls {
			return Err(EnigmaError::MovingRotors {
				expected: self.pawls,
				found,
			});
		}
		Ok(())
	}

	/// Sets the ring of every non-reflector slot from `ring`.
	pub fn set_machine_alphabet(&mut self, ring: &str) -> Result<()> {
		self.apply("ring setting", ring, Rotor::set_alphabet_ring)
	}

	pub fn set_plugboard(&mut self, plugboard: Permutation) {
		if !plugboard.is_involution() {
			warn!(%plugboard, "plugboard is not a set of swaps");
		}
		self.plugboard = plugboard;
	}

	/// Decides which slots step for the next character. Notches are read before
	/// anything moves, which gives the double step of the middle rotor.
	fn step(&mut self) {
		let mut advance = vec![false; self.rotors.len()];
		if let Some(last) = advance.last_mut() {
			*last = true;
		}

		for i in (1..self.rotors.len()).rev() {
			if self.rotors[i].at_notch() && self.rotors[i - 1].rotates() {
				advance[i - 1] = true;
				advance[i] = true;
			}
		}

		for (rotor, &a) in self.rotors.iter_mut().zip(&advance) {
			if a {
				rotor.advance();
			}
		}
		trace!(settings = ?self.settings(), "stepped");
	}

	/// Converts the character with index `c` after first advancing the machine.
	/// Fails if the slots haven't been filled or `c` is outside the alphabet.
	pub fn convert_index(&mut self, c: usize) -> Result<usize> {
		if self.rotors.len() != self.num_rotors {
			return Err(EnigmaError::NoRotors);
		}
		if c >= self.alphabet.size() {
			return Err(EnigmaError::IndexOutOfRange {
				index: c,
				size: self.alphabet.size(),
			});
		}
		self.step();

		let mut v = self.plugboard.permute(c as isize);
		for rotor in self.rotors[1..].iter().rev() {
			v = rotor.convert_forward(v as isize);
		}
		for rotor in &self.rotors {
			v = rotor.convert_backward(v as isize);
		}
		Ok(self.plugboard.permute(v as isize))
	}

	/// Converts every character of `msg`, stepping the rotors as it goes.
	pub fn convert(&mut self, msg: &str) -> Result<String> {
		let mut out = String::with_capacity(msg.len());
		for c in msg.chars() {
			let i = self.alphabet.to_int(c)?;
			let e = self.convert_index(i)?;
			out.push(self.alphabet.to_char(e)?);
		}
		debug!(len = out.len(), "converted message");
		Ok(out)
	}
}
