use clap::{ArgAction, Parser};
use std::num::IntErrorKind;

mod error;
mod search;
mod sequence;

use search::{run_search, SearchConfig};

// --- Command Line Arguments ---

#[derive(Parser, Debug)]
#[command(name = "finder")]
#[command(about = "Finds all pandivisible numbers with the given BASE.")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
struct Args {
    /// Base to search in (at least 2)
    #[arg(
        value_name = "BASE",
        value_parser = parse_base,
        required_unless_present = "version"
    )]
    base: Option<u32>,

    /// Use the specified number of threads to search
    #[arg(
        short = 't',
        value_name = "NTHREADS",
        value_parser = parse_threads,
        default_value = "1"
    )]
    threads: usize,

    /// Print help
    #[allow(dead_code)]
    #[arg(short = 'h', long = "help", short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version and license information
    #[arg(short = 'v', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

fn version_banner() -> String {
    format!(
        "finder version {}\n\
         This software is licensed under the MIT or Apache-2.0 license, at your option.\n\
         This software is distributed on an \"AS IS\" BASIS, WITHOUT WARRANTIES OR\n\
         CONDITIONS OF ANY KIND\n",
        env!("CARGO_PKG_VERSION")
    )
}

// --- Argument Parsing ---

/// Parse an unsigned integer with C-style radix prefixes: `0x` for
/// hexadecimal, a leading `0` for octal, decimal otherwise.
fn parse_unsigned(s: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        u64::from_str_radix(&s[1..], 8)
    } else {
        s.parse()
    }
}

fn parse_base(s: &str) -> Result<u32, String> {
    let value = match parse_unsigned(s) {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err("base out of range".to_string())
        }
        Err(_) => return Err("could not parse base".to_string()),
    };
    if !(2..=i32::MAX as u64).contains(&value) {
        return Err("base out of range".to_string());
    }
    Ok(value as u32)
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let value = match parse_unsigned(s) {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err("number of threads out of range".to_string())
        }
        Err(_) => return Err("could not parse number of threads".to_string()),
    };
    match usize::try_from(value) {
        Ok(0) | Err(_) => Err("number of threads out of range".to_string()),
        Ok(n) => Ok(n),
    }
}

// --- Main Function ---
fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if args.version {
        print!("{}", version_banner());
        return;
    }

    let base = match args.base {
        Some(base) => base,
        None => {
            eprintln!("finder: missing base");
            std::process::exit(1);
        }
    };

    let config = SearchConfig::new(base)
        .with_workers(args.threads)
        .with_echo(true);

    match run_search(&config) {
        Ok(result) => println!("{}", result.summary()),
        Err(e) => {
            eprintln!("finder: {}", e);
            std::process::exit(1);
        }
    }
}
