//! Command-line interface for counter-reports

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use counter_reports::documents::{Document, Element, WriterConfig};
#[cfg(feature = "cli")]
use counter_reports::elements::{build_with_limits, registry};
#[cfg(feature = "cli")]
use counter_reports::limits::Limits;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "counter-reports")]
#[command(author, version, about = "Build and inspect COUNTER report XML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an element from JSON data and write it as XML
    Build {
        /// Path to the JSON input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Tag of the element to build, e.g. ReportItems
        #[arg(short, long)]
        element: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit the XML declaration
        #[arg(long)]
        no_declaration: bool,

        /// Apply strict input limits
        #[arg(long)]
        strict: bool,
    },

    /// List the registered elements and their fields
    Elements {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the element outline of an XML file
    Inspect {
        /// Path to the XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            file,
            element,
            output,
            no_declaration,
            strict,
        } => cmd_build(file, element, output, no_declaration, strict),
        Commands::Elements { json } => cmd_elements(json),
        Commands::Inspect { file } => cmd_inspect(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_build(
    file: PathBuf,
    tag: String,
    output: Option<PathBuf>,
    no_declaration: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(&file)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;

    let limits = if strict { Limits::strict() } else { Limits::default() };
    let element = build_with_limits(&tag, &raw, &limits)?;

    let config = WriterConfig::new().with_declaration(!no_declaration);
    let xml = element.as_document().to_xml_string_with(&config)?;

    if let Some(output_path) = output {
        fs::write(output_path, &xml)?;
    } else {
        println!("{}", xml);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_elements(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registrations: Vec<_> = registry::registrations().collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&registrations)?);
        return Ok(());
    }

    for registration in registrations {
        println!("{}", registration.tag);
        for field in registration.fields {
            println!("  {}", field);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(&file)?;
    let doc = Document::from_string(&content)?;
    print_outline(doc.root(), 0);
    Ok(())
}

#[cfg(feature = "cli")]
fn print_outline(element: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    match element.text() {
        Some(text) => println!("{}{} = {}", indent, element.name(), text),
        None => println!("{}{}", indent, element.name()),
    }
    for child in element.children() {
        print_outline(child, depth + 1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
