use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use enigma::{MachineConfig, Session};

/// Enigma machine simulator.
///
/// Reads a machine description from CONFIG, then processes INPUT: lines
/// starting with `*` set the machine up, every other line is enciphered (or
/// deciphered) and printed in groups of five letters.
#[derive(Parser, Debug)]
#[command(name = "enigma", version, about)]
struct Cli {
	/// Machine configuration file
	config: PathBuf,

	/// Messages to process [default: standard input]
	input: Option<PathBuf>,

	/// Where to write the results [default: standard output]
	output: Option<PathBuf>,

	/// Log more (-v for debug, -vv for trace); RUST_LOG overrides
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

macro_rules! unwrap {
	($res:expr) => (
		match $res {
			Ok(v) => v,
			Err(e) => {
				let _ = writeln!(io::stderr(), "Error: {:#}", e);
				process::exit(1);
			}
		}
	)
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn BufRead>> {
	Ok(match path {
		Some(p) => {
			let f = File::open(p).with_context(|| format!("could not open {}", p.display()))?;
			Box::new(BufReader::new(f))
		}
		None => Box::new(io::stdin().lock()),
	})
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>> {
	Ok(match path {
		Some(p) => {
			let f = File::create(p).with_context(|| format!("could not open {}", p.display()))?;
			Box::new(BufWriter::new(f))
		}
		None => Box::new(io::stdout().lock()),
	})
}

fn run(cli: &Cli) -> Result<()> {
	let text = fs::read_to_string(&cli.config)
		.with_context(|| format!("could not open {}", cli.config.display()))?;
	let machine = MachineConfig::parse(&text)?.build()?;

	let input = open_input(&cli.input)?;
	let output = open_output(&cli.output)?;
	Session::new(machine).run(input, output)?;

	Ok(())
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	unwrap!(run(&cli));
}
