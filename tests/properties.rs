use std::sync::Arc;

use proptest::prelude::*;

use enigma::alphabet::UPPER;
use enigma::{Alphabet, Machine, MachineConfig, Permutation};

const CONFIG: &str = include_str!("../testing/default.conf");
const MOVING: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];

/// Cycle notation for a random permutation of `UPPER`.
fn cycles() -> impl Strategy<Value = String> {
	Just(UPPER.chars().collect::<Vec<_>>())
		.prop_shuffle()
		.prop_flat_map(|letters| {
			(Just(letters), proptest::collection::vec(1usize..6, 26))
		})
		.prop_map(|(letters, lens)| {
			let mut out = String::new();
			let mut rest = &letters[..];
			for len in lens {
				if rest.is_empty() {
					break;
				}
				let (cycle, tail) = rest.split_at(len.min(rest.len()));
				out.push('(');
				out.extend(cycle);
				out.push(')');
				rest = tail;
			}
			out
		})
}

fn letters(n: usize) -> impl Strategy<Value = String> {
	proptest::collection::vec(0..26usize, n)
		.prop_map(|v| v.into_iter().map(|i| UPPER.as_bytes()[i] as char).collect())
}

/// Three distinct moving rotors.
fn moving_rotors() -> impl Strategy<Value = Vec<&'static str>> {
	Just(MOVING.to_vec()).prop_shuffle().prop_map(|v| v[..3].to_vec())
}

fn machine() -> Machine {
	MachineConfig::parse(CONFIG).unwrap().build().unwrap()
}

fn setup(m: &mut Machine, rotors: &[&str], setting: &str, ring: &str, plugs: &str) {
	let mut names = vec!["B", "Beta"];
	names.extend_from_slice(rotors);
	m.insert_rotors(&names).unwrap();
	m.set_rotors(setting).unwrap();
	m.set_machine_alphabet(ring).unwrap();
	let p = Permutation::new(plugs, m.alphabet().clone()).unwrap();
	m.set_plugboard(p);
}

proptest! {
	#[test]
	fn invert_undoes_permute(c in cycles(), x in 0isize..26) {
		let p = Permutation::new(&c, Arc::new(Alphabet::default())).unwrap();
		prop_assert_eq!(p.invert(p.permute(x) as isize), x as usize);
		prop_assert_eq!(p.permute(p.invert(x) as isize), x as usize);
	}

	#[test]
	fn wrap_is_periodic(p in -10_000isize..10_000, k in -100isize..100, n in 1usize..40) {
		let alpha: String = UPPER.chars().chain("0123456789abcdef".chars()).take(n).collect();
		let perm = Permutation::identity(Arc::new(Alphabet::new(&alpha).unwrap()));
		let w = perm.wrap(p);
		prop_assert!(w < n);
		prop_assert_eq!(w, perm.wrap(p + k * n as isize));
	}

	#[test]
	fn encipher_then_decipher(
		rotors in moving_rotors(),
		setting in letters(4),
		ring in letters(4),
		msg in "[A-Z]{0,200}",
	) {
		let plugs = "(AQ) (WS) (ED) (RF) (TG) (YH)";
		let mut m = machine();

		setup(&mut m, &rotors, &setting, &ring, plugs);
		let cipher = m.convert(&msg).unwrap();

		setup(&mut m, &rotors, &setting, &ring, plugs);
		prop_assert_eq!(m.convert(&cipher).unwrap(), msg);
	}

	#[test]
	fn no_letter_enciphers_to_itself(rotors in moving_rotors(), setting in letters(4), msg in "[A-Z]{1,100}") {
		let mut m = machine();
		setup(&mut m, &rotors, &setting, "AAAA", "");
		let cipher = m.convert(&msg).unwrap();
		for (a, b) in msg.chars().zip(cipher.chars()) {
			prop_assert_ne!(a, b);
		}
	}
}
