//! hl7-inspect CLI - parse an HL7 v2 file and print what was understood
//!
//! Reads one message per file (segments separated by `\r`, or `\n` with
//! `--newlines`) and prints a summary, the re-serialized wire form, or JSON.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use hl7_message::{Delimiters, Message, ParserConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hl7-inspect")]
#[command(version, about = "Inspect HL7 v2 messages", long_about = None)]
struct Cli {
    /// YAML file with extra segment layouts and delimiters
    #[arg(short, long, global = true)]
    layouts: Option<PathBuf>,

    /// Take element and item delimiters from the MSH header
    #[arg(short, long, global = true)]
    detect_delimiters: bool,

    /// Treat line feeds as the segment delimiter
    #[arg(short, long, global = true)]
    newlines: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line per segment with its type, weight and set id
    Summary {
        /// Message file
        file: PathBuf,
    },

    /// Print the message re-serialized in wire format
    Wire {
        /// Message file
        file: PathBuf,
    },

    /// Print the message as JSON
    Json {
        /// Message file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> hl7_message::Result<()> {
    let mut config = match &cli.layouts {
        Some(path) => ParserConfig::load_from_file(path)?,
        None => ParserConfig::default(),
    };

    let file = match &cli.command {
        Commands::Summary { file } | Commands::Wire { file } | Commands::Json { file } => file,
    };
    let raw = fs::read_to_string(file)?;
    let raw = raw.trim_end_matches(['\r', '\n']);

    if cli.detect_delimiters {
        let detected = Delimiters::detect(raw);
        config.delimiters.element = detected.element;
        config.delimiters.item = detected.item;
    }
    if cli.newlines {
        config.delimiters.segment = '\n';
    }

    let message = config.parse(raw)?;
    tracing::info!("Parsed {} segments from {}", message.len(), file.display());

    match cli.command {
        Commands::Summary { .. } => print_summary(&message),
        Commands::Wire { .. } => println!("{}", message.to_hl7()),
        Commands::Json { .. } => println!("{}", message.to_json_pretty()?),
    }

    Ok(())
}

fn print_summary(message: &Message) {
    if let Some(message_type) = message.message_type() {
        println!("Message type: {}", message_type);
    }
    if let Some(control_id) = message.control_id() {
        println!("Control id:   {}", control_id);
    }
    println!("Segments:     {}", message.len());
    println!();

    for (i, segment) in message.iter().enumerate() {
        let layout = if segment.is_generic() { " (generic)" } else { "" };
        let set_id = segment
            .set_id()
            .map(|id| format!(" set_id={}", id))
            .unwrap_or_default();
        println!(
            "{:>3}  {:<4} fields={}{}{}",
            i,
            segment.type_id(),
            segment.len(),
            set_id,
            layout
        );
    }
}
