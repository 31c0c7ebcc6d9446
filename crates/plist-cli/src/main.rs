//! `plist` CLI — decode XML property lists and check MIME types from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a plist to pretty-printed JSON (stdin → stdout)
//! echo '<plist><integer>6</integer></plist>' | plist decode
//!
//! # Decode from file to file, compact output
//! plist decode -i Info.plist -o info.json --compact
//!
//! # Check whether a content type would be routed to the plist decoder
//! plist mime 'application/rss+xml; charset=utf-8'
//!
//! # Log decoder internals
//! RUST_LOG=plist_core=trace plist decode -i Info.plist
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plist_core::{MimeMatcher, TreeOptions, DEFAULT_MAX_DEPTH};
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plist", version, about = "XML property list decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an XML plist to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Match tag names case-sensitively instead of lowercasing them
        #[arg(long)]
        preserve_case: bool,
        /// Reject documents nested deeper than this many elements
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Test whether a Content-Type would be decoded as a plist
    Mime {
        /// Content-Type header value, e.g. "application/xml; charset=utf-8"
        content_type: String,
        /// Custom regular expression to match instead of the XML default
        #[arg(long)]
        pattern: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            output,
            compact,
            preserve_case,
            max_depth,
        } => {
            let xml = read_input(input.as_deref())?;
            let options = TreeOptions::default()
                .with_normalize_tags(!preserve_case)
                .with_max_depth(max_depth);
            let value =
                plist_core::decode_str_with(&xml, &options).context("Failed to decode plist")?;
            debug!(kind = value.type_name(), "decoded input");
            let json = plist_core::to_json_string(&value, !compact)
                .context("Failed to serialize JSON")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Mime {
            content_type,
            pattern,
        } => {
            let mime = match pattern.as_deref() {
                Some(pattern) => MimeMatcher::with_pattern(pattern)
                    .with_context(|| format!("Invalid MIME pattern: {}", pattern))?,
                None => MimeMatcher::new(),
            };
            if mime.matches(&content_type) {
                println!("match");
            } else {
                println!("no match");
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Send logs to stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
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
            println!("{}", content);
        }
    }
    Ok(())
}
