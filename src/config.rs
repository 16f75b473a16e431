//! Reader for machine configuration files.
//!
//! A configuration is a whitespace-separated list of tokens:
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ      alphabet
//! 5 3                             rotor slots, pawls
//! I MQ   (AELTPHQXRU) (BKNW) ...  name, type, wiring
//! Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R    (AE) (BN) (CK) ...
//! ```
//!
//! The type is `M` followed by the notch letters for a moving rotor, `N` for a
//! rotor that doesn't move and `R` for a reflector. Line breaks don't matter.

use std::iter::Peekable;
use std::str::{FromStr, SplitWhitespace};
use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::Rotor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorType {
	Moving { notches: String },
	Fixed,
	Reflector,
}

/// One rotor as described in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
	pub name: String,
	pub kind: RotorType,
	pub cycles: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
	pub alphabet: Arc<Alphabet>,
	pub num_rotors: usize,
	pub pawls: usize,
	pub rotors: Vec<RotorSpec>,
}

/// Whether `tok` belongs to a run of cycles, `(AB)`, `(ABC` or `D)`.
pub fn is_cycle_token(tok: &str) -> bool {
	tok.starts_with('(') || tok.ends_with(')')
}

/// Joins the cycle tokens at the front of `tokens`.
pub(crate) fn take_cycles<'a, I>(tokens: &mut Peekable<I>) -> String
where
	I: Iterator<Item = &'a str>,
{
	let mut cycles = Vec::new();
	while let Some(tok) = tokens.next_if(|t| is_cycle_token(t)) {
		cycles.push(tok);
	}
	cycles.join(" ")
}

fn truncated() -> EnigmaError {
	EnigmaError::Config("configuration file truncated".to_string())
}

fn number(tokens: &mut Peekable<SplitWhitespace>, what: &str) -> Result<usize> {
	let tok = tokens.next().ok_or_else(truncated)?;
	tok.parse()
		.map_err(|_| EnigmaError::Config(format!("expected {}, got {:?}", what, tok)))
}

fn rotor_type(name: &str, tag: &str) -> Result<RotorType> {
	let mut chars = tag.chars();
	let kind = match (chars.next(), chars.as_str()) {
		(Some('M'), notches) => RotorType::Moving { notches: notches.to_string() },
		(Some('N'), "") => RotorType::Fixed,
		(Some('R'), "") => RotorType::Reflector,
		_ => {
			return Err(EnigmaError::Config(format!(
				"bad type {:?} for rotor {:?}",
				tag, name
			)))
		}
	};
	Ok(kind)
}

impl MachineConfig {
	pub fn parse(text: &str) -> Result<MachineConfig> {
		let mut tokens = text.split_whitespace().peekable();

		let alphabet = Arc::new(Alphabet::new(tokens.next().ok_or_else(truncated)?)?);
		let num_rotors = number(&mut tokens, "number of rotor slots")?;
		let pawls = number(&mut tokens, "number of pawls")?;

		let mut rotors = Vec::new();
		while let Some(name) = tokens.next() {
			if is_cycle_token(name) {
				return Err(EnigmaError::Config(format!("expected a rotor name, got {:?}", name)));
			}
			let tag = tokens.next_if(|t| !is_cycle_token(t)).ok_or_else(|| {
				EnigmaError::Config(format!("bad rotor description for {:?}", name))
			})?;

			rotors.push(RotorSpec {
				name: name.to_string(),
				kind: rotor_type(name, tag)?,
				cycles: take_cycles(&mut tokens),
			});
		}

		debug!(%alphabet, num_rotors, pawls, rotors = rotors.len(), "read configuration");
		Ok(MachineConfig { alphabet, num_rotors, pawls, rotors })
	}

	/// Builds every rotor over the configured alphabet and puts them in a
	/// machine.
	pub fn build(&self) -> Result<Machine> {
		let rotors = self
			.rotors
			.iter()
			.map(|spec| spec.build(&self.alphabet))
			.collect::<Result<Vec<_>>>()?;

		Machine::new(self.alphabet.clone(), self.num_rotors, self.pawls, rotors)
	}
}

impl RotorSpec {
	pub fn build(&self, alphabet: &Arc<Alphabet>) -> Result<Rotor> {
		let perm = Permutation::new(&self.cycles, alphabet.clone())?;
		match &self.kind {
			RotorType::Moving { notches } => Rotor::moving(&self.name, perm, notches),
			RotorType::Fixed => Ok(Rotor::fixed(&self.name, perm)),
			RotorType::Reflector => Ok(Rotor::reflector(&self.name, perm)),
		}
	}
}

impl FromStr for MachineConfig {
	type Err = EnigmaError;

	fn from_str(s: &str) -> Result<MachineConfig> {
		MachineConfig::parse(s)
	}
}
