//! Drives a machine over an input stream: `*` lines set the machine up, every
//! other line is a message.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::{is_cycle_token, take_cycles};
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::output::{groups, GROUP};
use crate::permutation::Permutation;

/// A parsed `* ROTORS... SETTING [RING] [PLUGBOARD...]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingLine {
	pub rotors: Vec<String>,
	pub setting: String,
	pub ring: Option<String>,
	pub plugboard: String,
}

fn bad_setting(line: &str, why: &str) -> EnigmaError {
	EnigmaError::Input(format!("bad setting line {:?}: {}", line, why))
}

impl SettingLine {
	/// Parses a setting line for a machine with `num_rotors` slots.
	pub fn parse(line: &str, num_rotors: usize) -> Result<SettingLine> {
		let rest = line
			.trim_start()
			.strip_prefix('*')
			.ok_or_else(|| bad_setting(line, "does not start with '*'"))?;
		let mut tokens = rest.split_whitespace().peekable();

		let mut rotors = Vec::with_capacity(num_rotors);
		for _ in 0..num_rotors {
			match tokens.next_if(|t| !is_cycle_token(t)) {
				Some(name) => rotors.push(name.to_string()),
				None => return Err(bad_setting(line, "too few rotors")),
			}
		}

		let setting = tokens
			.next_if(|t| !is_cycle_token(t))
			.ok_or_else(|| bad_setting(line, "no rotor setting"))?
			.to_string();
		let ring = tokens.next_if(|t| !is_cycle_token(t)).map(str::to_string);
		let plugboard = take_cycles(&mut tokens);

		if let Some(extra) = tokens.next() {
			return Err(bad_setting(line, &format!("unexpected {:?}", extra)));
		}

		Ok(SettingLine { rotors, setting, ring, plugboard })
	}
}

/// A machine plus what has happened to it so far in the input.
#[derive(Debug)]
pub struct Session {
	machine: Machine,
	configured: bool,
}

impl Session {
	pub fn new(machine: Machine) -> Session {
		Session { machine, configured: false }
	}

	pub fn machine(&self) -> &Machine {
		&self.machine
	}

	pub fn into_machine(self) -> Machine {
		self.machine
	}

	/// Sets up the machine for the messages that follow.
	pub fn apply(&mut self, s: &SettingLine) -> Result<()> {
		self.configured = false;

		self.machine.insert_rotors(&s.rotors)?;
		self.machine.set_rotors(&s.setting)?;
		if let Some(ring) = &s.ring {
			self.machine.set_machine_alphabet(ring)?;
		}
		let plugboard = Permutation::new(&s.plugboard, self.machine.alphabet().clone())?;
		self.machine.set_plugboard(plugboard);

		debug!(rotors = ?s.rotors, setting = %s.setting, ring = ?s.ring, plugboard = %s.plugboard, "machine set up");
		self.configured = true;
		Ok(())
	}

	/// Message characters with whitespace dropped. Lower-case letters are taken
	/// as their upper-case forms if only those are in the alphabet.
	fn message(&self, line: &str) -> String {
		let alphabet = self.machine.alphabet();
		line.chars()
			.filter(|c| !c.is_whitespace())
			.map(|c| {
				let upper = c.to_ascii_uppercase();
				if !alphabet.contains(c) && alphabet.contains(upper) {
					upper
				} else {
					c
				}
			})
			.collect()
	}

	/// Handles one line of input, returning the text to print for it, if any.
	pub fn process_line(&mut self, line: &str) -> Result<Option<String>> {
		if line.trim_start().starts_with('*') {
			let setting = SettingLine::parse(line, self.machine.num_rotors())?;
			self.apply(&setting)?;
			return Ok(None);
		}

		if !self.configured {
			if line.trim().is_empty() {
				return Ok(None);
			}
			return Err(EnigmaError::Input(
				"input has wrong format: message before any setting line".to_string(),
			));
		}

		let msg = self.message(line);
		let converted = self.machine.convert(&msg)?;
		Ok(Some(groups(&converted, GROUP)))
	}

	/// Processes all of `input`, writing converted messages to `output`.
	pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
		let mut seen_setting = false;
		for line in input.lines() {
			let line = line?;
			seen_setting |= line.trim_start().starts_with('*');
			if let Some(out) = self.process_line(&line)? {
				writeln!(output, "{}", out)?;
			}
		}
		output.flush()?;

		if !seen_setting {
			return Err(EnigmaError::Input("input has wrong format: no setting line".to_string()));
		}
		Ok(())
	}
}
