//! fmsnippet CLI
//!
//! Usage:
//!   fmsnippet [OPTIONS] <COMMAND> [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Configuration file (TOML format)
//!   -d, --debug          Verbose logging and full error chains
//!   -p, --paste          Load the snippet onto FileMaker's clipboard
//!   -h, --help           Print help

use std::error::Error as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fmsnippet::snippet::{extract_object_css, extract_object_names};
use fmsnippet::{run, Automation, ClipboardBridge, Command, Error, Snippet, SnippetConfig};

#[derive(Parser)]
#[command(name = "fmsnippet")]
#[command(about = "Build FileMaker clipboard snippets from tab-delimited rows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging and full error chains
    #[arg(short, long, global = true)]
    debug: bool,

    /// Load the snippet onto FileMaker's clipboard instead of printing it
    #[arg(short, long, global = true)]
    paste: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Field definitions: name, type, global, comment, repetitions, calculation
    Fields { input: Option<PathBuf> },
    /// Stacked field objects: table::field, tooltip, font, fontSize, objectName, height, width, marginTop
    LayoutFields { input: Option<PathBuf> },
    /// Field objects with labels: table::field, label, tooltip, font, fontSize, objectName
    LayoutFieldsLabeled { input: Option<PathBuf> },
    /// Field objects wrapped in Perform Script buttons (..., scriptId, scriptParam)
    LayoutFieldButtons { input: Option<PathBuf> },
    /// Set Field steps: table::field, value, repetition
    SetField { input: Option<PathBuf> },
    /// Set Variable steps: name, value, repetition
    SetVariable { input: Option<PathBuf> },
    /// Sort Records steps, one per blank-line separated group
    Sort { input: Option<PathBuf> },
    /// Sort Records steps inside an If / Else If chain
    SortWithTests { input: Option<PathBuf> },
    /// Grids of repeating fields: table::field, rows, cols, repStart, ...
    FieldGrid { input: Option<PathBuf> },
    /// Print the snippet on the clipboard
    Pull,
    /// Print object names of the snippet on the clipboard (or in FILE)
    Names { input: Option<PathBuf> },
    /// Print the local CSS of the snippet on the clipboard (or in FILE)
    Css { input: Option<PathBuf> },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "fmsnippet=debug"
    } else {
        "fmsnippet=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => match SnippetConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SnippetConfig::default(),
    };

    let mut bridge = ClipboardBridge::osascript(config.clipboard.clone());

    let (command, input) = match &cli.command {
        Commands::Fields { input } => (Command::Fields, input),
        Commands::LayoutFields { input } => (Command::LayoutFields, input),
        Commands::LayoutFieldsLabeled { input } => (Command::LayoutFieldsLabeled, input),
        Commands::LayoutFieldButtons { input } => (Command::LayoutFieldButtons, input),
        Commands::SetField { input } => (Command::SetField, input),
        Commands::SetVariable { input } => (Command::SetVariable, input),
        Commands::Sort { input } => (Command::Sort, input),
        Commands::SortWithTests { input } => (Command::SortWithTests, input),
        Commands::FieldGrid { input } => (Command::FieldGrid, input),
        Commands::Pull => {
            let result = bridge.pull().map_err(Error::from);
            finish(result.map(|xml| vec![xml]), cli.debug, "clipboard");
            return;
        }
        Commands::Names { input } => {
            let result = snippet_text(input.as_deref(), &mut bridge).and_then(|xml| {
                extract_object_names(&xml).map_err(Error::from)
            });
            finish(result, cli.debug, "clipboard");
            return;
        }
        Commands::Css { input } => {
            let result = snippet_text(input.as_deref(), &mut bridge)
                .and_then(|xml| extract_object_css(&xml).map_err(Error::from));
            finish(result, cli.debug, "clipboard");
            return;
        }
    };

    let source = read_input(input.as_deref());
    let filename = input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let result = run(command, &source, &config.layout)
        .and_then(|doc| output_lines(&doc, cli.paste, &mut bridge));
    finish(result, cli.debug, &filename);
}

/// The snippet's XML, or with `paste` the paste script's response
fn output_lines<A: Automation>(
    doc: &Snippet,
    paste: bool,
    bridge: &mut ClipboardBridge<A>,
) -> Result<Vec<String>, Error> {
    if !paste {
        return Ok(vec![doc.to_xml()]);
    }
    let response = bridge.push(doc)?;
    let response = response.trim_end();
    if response.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(vec![response.to_string()])
    }
}

/// Read the snippet from a file, or pull it off the clipboard
fn snippet_text(
    input: Option<&Path>,
    bridge: &mut ClipboardBridge<fmsnippet::clipboard::OsascriptAutomation>,
) -> Result<String, Error> {
    match input {
        Some(path) => Ok(read_input(Some(path))),
        None => Ok(bridge.pull()?),
    }
}

fn read_input(path: Option<&Path>) -> String {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn finish(result: Result<Vec<String>, Error>, debug: bool, filename: &str) {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e.report(filename));
            if debug {
                let mut source = e.source();
                while let Some(cause) = source {
                    eprintln!("  caused by: {}", cause);
                    source = cause.source();
                }
            }
            std::process::exit(1);
        }
    }
}
