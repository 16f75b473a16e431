//! A rotor cipher machine in the style of the four-rotor naval Enigma.
//!
//! A [`Machine`] is built from a pool of [`Rotor`]s over a shared
//! [`Alphabet`]. Each rotor's wiring is a [`Permutation`] in cycle notation.
//! Converting a character steps the rotors (double step included) and sends the
//! signal through the plugboard, the rotors, the reflector and back, so the same
//! settings both encipher and decipher.
//!
//! ```
//! use enigma::MachineConfig;
//!
//! let conf = "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
//!     I MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!     II ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//!     III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!     Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!     B R (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)";
//!
//! let mut m = MachineConfig::parse(conf)?.build()?;
//! m.insert_rotors(&["B", "Beta", "I", "II", "III"])?;
//! m.set_rotors("AAAA")?;
//! assert_eq!(m.convert("AAAAA")?, "BDZGO");
//! # Ok::<(), enigma::EnigmaError>(())
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod output;
pub mod permutation;
pub mod rotor;
pub mod session;

pub use alphabet::Alphabet;
pub use config::{MachineConfig, RotorSpec, RotorType};
pub use error::{EnigmaError, ErrorKind, Result};
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{Rotor, RotorKind};
pub use session::{Session, SettingLine};
