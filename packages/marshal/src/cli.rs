//! Command-line interface for the marshalling engine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{validate_version, DEFAULT_VERSION};
use crate::error::{QtiError, Result};
use crate::marshaller::{detect_version, marshal_to_string, unmarshal};
use crate::xml::{self, Node};

/// qtibind - Read, check and convert QTI documents across schema revisions.
#[derive(Parser)]
#[command(name = "qtibind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a document can be read under a schema revision.
    Check {
        /// Path to the XML document
        file: PathBuf,

        /// Schema revision (default: detected from the root namespace)
        #[arg(short, long)]
        version: Option<String>,
    },

    /// Read a document under one revision and write it under another.
    Convert {
        /// Path to the XML document
        file: PathBuf,

        /// Source revision (default: detected from the root namespace)
        #[arg(long)]
        from: Option<String>,

        /// Target revision
        #[arg(long)]
        to: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the component tree of a document as YAML.
    Dump {
        /// Path to the XML document
        file: PathBuf,

        /// Schema revision (default: detected from the root namespace)
        #[arg(short, long)]
        version: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, version } => check_command(&file, version.as_deref()),
        Commands::Convert {
            file,
            from,
            to,
            output,
        } => convert_command(&file, from.as_deref(), &to, output.as_deref()),
        Commands::Dump { file, version } => dump_command(&file, version.as_deref()),
    }
}

/// Execute the check command.
fn check_command(file: &Path, version: Option<&str>) -> Result<()> {
    let node = read_document(file)?;
    let version = resolve_version(version, &node)?;
    let component = unmarshal(&node, &version)?;

    println!(
        "{} {} (QTI {}, {} elements)",
        style("Valid").green().bold(),
        file.display(),
        style(&version).cyan(),
        component.count()
    );
    Ok(())
}

/// Execute the convert command.
fn convert_command(file: &Path, from: Option<&str>, to: &str, output: Option<&Path>) -> Result<()> {
    validate_version(to)?;
    let node = read_document(file)?;
    let from = resolve_version(from, &node)?;

    let component = unmarshal(&node, &from)?;
    let text = marshal_to_string(&component, to)?;

    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!(
                "{} {} from QTI {} to {}",
                style("Converted").green().bold(),
                path.display(),
                style(&from).cyan(),
                style(to).cyan()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Execute the dump command.
fn dump_command(file: &Path, version: Option<&str>) -> Result<()> {
    let node = read_document(file)?;
    let version = resolve_version(version, &node)?;
    let component = unmarshal(&node, &version)?;

    print!("{}", serde_yaml_ng::to_string(&component)?);
    Ok(())
}

fn read_document(file: &Path) -> Result<Node> {
    if !file.is_file() {
        return Err(QtiError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file does not exist: {}", file.display()),
        )));
    }
    xml::parse(&fs::read_to_string(file)?)
}

/// Use the requested revision, or guess one from the document.
fn resolve_version(requested: Option<&str>, node: &Node) -> Result<String> {
    match requested {
        Some(version) => {
            validate_version(version)?;
            Ok(version.to_string())
        }
        None => {
            let detected = detect_version(node).unwrap_or(DEFAULT_VERSION);
            tracing::debug!(version = detected, "Using revision detected from root namespace");
            Ok(detected.to_string())
        }
    }
}
