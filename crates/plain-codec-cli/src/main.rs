//! `plain` CLI: convert between JSON and plain-codec text from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to compact text (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | plain encode
//!
//! # Encode from file to file, indented by two spaces
//! plain encode -i data.json -o data.txt --indent 2
//!
//! # Decode text back to pretty-printed JSON, refusing deep nesting
//! plain decode -i data.txt --max-depth 64
//!
//! # Re-format existing text
//! plain fmt -i data.txt --indent 4
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=plain_codec=debug` to see why a
//! decode failed.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plain_codec::Decoder;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "plain",
    version,
    about = "Convert between JSON and plain-codec text"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to plain-codec text
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level; compact output if omitted
        #[arg(long)]
        indent: Option<usize>,
    },
    /// Decode plain-codec text to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Reject input nested deeper than this many levels
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Re-encode plain-codec text, compact or indented
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per nesting level; compact output if omitted
        #[arg(long)]
        indent: Option<usize>,
        /// Reject input nested deeper than this many levels
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            indent,
        } => {
            let json = read_input(input.as_deref())?;
            let text = plain_codec::json_to_text(&json, indent)
                .context("Failed to encode JSON to plain text")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Decode {
            input,
            output,
            max_depth,
        } => {
            let text = read_input(input.as_deref())?;
            let json = plain_codec::text_to_json(&text, &decoder(max_depth))
                .context("Failed to decode plain text to JSON")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Fmt {
            input,
            output,
            indent,
            max_depth,
        } => {
            let text = read_input(input.as_deref())?;
            let value = decoder(max_depth)
                .decode(&text)
                .context("Failed to decode plain text")?;
            let formatted =
                plain_codec::encode(&value, indent).context("Failed to encode plain text")?;
            write_output(output.as_deref(), &formatted)?;
        }
    }

    Ok(())
}

fn decoder(max_depth: Option<usize>) -> Decoder {
    match max_depth {
        Some(limit) => Decoder::new().max_depth(limit),
        None => Decoder::new(),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
