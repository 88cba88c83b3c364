//! Command-line interface for bbtext
//!
//! Inspects, converts and edits bbtext markup from the shell. Every command reads a file
//! (or stdin when the path is `-`) and writes to stdout.
//!
//! Usage:
//!   bbtext tokens `<path>` [--format simple|json]          - Token stream
//!   bbtext tree `<path>` [--format treeviz|json]           - Tag tree
//!   bbtext buffer `<path>` [--format simple|json|yaml]     - Styled runs
//!   bbtext export `<path>`                                 - Canonical markup
//!   bbtext toggle `<path>` --trait bold --range 1..3       - Toggle a trait, print markup
//!   bbtext detect `<path>` [--kinds link,phone]            - Runs with detected links
//!   bbtext render `<path>`                                 - ANSI styled text
//!
//! Logging goes to stderr and is controlled by `BBTEXT_LOG` (an `EnvFilter` directive,
//! `warn` by default); `-v` switches it to `debug`.

mod render;

use anyhow::{Context, Result};
use bbtext_config::Loader;
use bbtext_core::bbtext::config::{Configuration, DetectionKinds};
use bbtext_core::bbtext::detection::{DetectionKind, PatternDetector};
use bbtext_core::bbtext::document::RichText;
use bbtext_core::bbtext::formats::{buffer_to_debug_string, tokens_to_debug_string, tree_to_treeviz};
use bbtext_core::bbtext::lexing::tokenize;
use bbtext_core::bbtext::parsing::build;
use bbtext_core::bbtext::styling::Trait;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Optional per-directory configuration picked up when `--config` is not given.
const LOCAL_CONFIG: &str = "bbtext.toml";

#[derive(Parser)]
#[command(name = "bbtext", version)]
#[command(about = "A tool for inspecting and editing bbtext markup")]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Log lenient recoveries and pipeline stages to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the token stream
    Tokens {
        /// Markup file, `-` for stdin
        path: PathBuf,
        #[arg(long, short = 'f', value_enum, default_value_t = TokensFormat::Simple)]
        format: TokensFormat,
    },
    /// Print the tag tree
    Tree {
        path: PathBuf,
        #[arg(long, short = 'f', value_enum, default_value_t = TreeFormat::Treeviz)]
        format: TreeFormat,
    },
    /// Print the styled buffer
    Buffer {
        path: PathBuf,
        #[arg(long, short = 'f', value_enum, default_value_t = BufferFormat::Simple)]
        format: BufferFormat,
    },
    /// Print the canonical markup
    Export { path: PathBuf },
    /// Toggle a trait over a character range and print the resulting markup
    Toggle {
        path: PathBuf,
        /// bold, italic, underline or strike-through
        #[arg(long = "trait")]
        member: Trait,
        /// Character range, `start..end`
        #[arg(long, value_parser = parse_range)]
        range: Range<usize>,
    },
    /// Run the detection overlay and print the styled buffer
    Detect {
        path: PathBuf,
        /// Kinds to detect; defaults to the configured kinds, or all of them
        #[arg(long, value_delimiter = ',')]
        kinds: Vec<DetectionKind>,
        #[arg(long, short = 'f', value_enum, default_value_t = BufferFormat::Simple)]
        format: BufferFormat,
    },
    /// Print the text with ANSI styling
    Render { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum TokensFormat {
    Simple,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum TreeFormat {
    Treeviz,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum BufferFormat {
    Simple,
    Json,
    Yaml,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("BBTEXT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_configuration(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Tokens { path, format } => {
            let tokens = tokenize(&read_source(&path)?);
            match format {
                TokensFormat::Simple => tokens_to_debug_string(&tokens),
                TokensFormat::Json => serde_json::to_string_pretty(&tokens)? + "\n",
            }
        }
        Command::Tree { path, format } => {
            let tree = build(&tokenize(&read_source(&path)?));
            match format {
                TreeFormat::Treeviz => tree_to_treeviz(&tree),
                TreeFormat::Json => serde_json::to_string_pretty(&tree)? + "\n",
            }
        }
        Command::Buffer { path, format } => {
            let document = RichText::from_markup(&read_source(&path)?, config);
            format_buffer(&document, format)?
        }
        Command::Export { path } => {
            let document = RichText::from_markup(&read_source(&path)?, config);
            document.markup()
        }
        Command::Toggle {
            path,
            member,
            range,
        } => {
            let mut document = RichText::from_markup(&read_source(&path)?, config);
            document
                .toggle(range.clone(), member)
                .with_context(|| format!("cannot toggle {} over {:?}", member, range))?;
            document.markup()
        }
        Command::Detect {
            path,
            kinds,
            format,
        } => {
            let kinds = detection_kinds(&kinds, &config);
            debug!(?kinds, "detecting");
            let config = config.with_detection(kinds);
            let mut document = RichText::from_markup(&read_source(&path)?, config);
            document.detect(&PatternDetector::new());
            format_buffer(&document, format)?
        }
        Command::Render { path } => {
            let document = RichText::from_markup(&read_source(&path)?, config);
            render::to_ansi(document.buffer(), document.configuration()) + "\n"
        }
    };

    print!("{}", output);
    Ok(())
}

fn load_configuration(path: Option<&Path>) -> Result<Configuration> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    let config = loader.build().context("failed to load configuration")?;
    Ok(config.to_configuration()?)
}

/// Requested kinds, else the configured ones, else everything.
fn detection_kinds(requested: &[DetectionKind], config: &Configuration) -> DetectionKinds {
    if !requested.is_empty() {
        return requested.iter().map(|kind| kind.flag()).collect();
    }
    if !config.detection().is_empty() {
        return config.detection();
    }
    DetectionKinds::all()
}

fn format_buffer(document: &RichText, format: BufferFormat) -> Result<String> {
    let buffer = document.buffer();
    Ok(match format {
        BufferFormat::Simple => buffer_to_debug_string(buffer),
        BufferFormat::Json => serde_json::to_string_pretty(buffer)? + "\n",
        BufferFormat::Yaml => serde_yaml::to_string(buffer)?,
    })
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse_range(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected start..end, got '{}'", value))?;
    let parse = |bound: &str| {
        bound
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid bound '{}': {}", bound, err))
    };
    Ok(parse(start)?..parse(end)?)
}
