use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use docmatch_help::output::{OutputFormat, format_bindings, format_registry};
use docmatch_help::{Document, HelpError, Outcome, Settings};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docmatch")]
#[command(about = "Match command lines against docopt-style help documents")]
#[command(version)]
struct Cli {
    /// Log parsing and matching decisions to stderr.
    #[arg(short, long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Match an invocation against a help document and print the bindings.
    Match(MatchArgs),
    /// Parse a help document and print its normalized usage pattern.
    Check(CheckArgs),
    /// Print the options declared by a help document.
    Options(OptionsArgs),
}

#[derive(Debug, Args)]
struct DocArgs {
    /// Help document to read (`-` for stdin).
    #[arg(long)]
    doc: PathBuf,
}

#[derive(Debug, Args)]
struct MatchArgs {
    #[command(flatten)]
    doc: DocArgs,
    /// Output format for the bindings.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// YAML settings file (help, version, options_first).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Treat everything after the first positional argument as positional.
    #[arg(long)]
    options_first: bool,
    /// Do not answer -h/--help with the document text.
    #[arg(long)]
    no_help: bool,
    /// Answer --version with this text.
    #[arg(long)]
    version_text: Option<String>,
    /// The invocation to match, after `--`.
    #[arg(last = true)]
    argv: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    doc: DocArgs,
}

#[derive(Debug, Args)]
struct OptionsArgs {
    #[command(flatten)]
    doc: DocArgs,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

/// Failures surfaced to the shell, each with its own exit code.
#[derive(Debug, Error)]
enum CliError {
    /// The invocation did not satisfy the document.
    #[error("{message}\n{usage}")]
    User { message: String, usage: String },
    /// The document, settings or I/O failed.
    #[error("error: {0}")]
    Failed(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::User { .. } => 1,
            Self::Failed(_) => 2,
        }
    }
}

impl From<HelpError> for CliError {
    fn from(err: HelpError) -> Self {
        match err {
            HelpError::User { reason, usage } => Self::User {
                message: reason.to_string(),
                usage,
            },
            other => Self::Failed(other.to_string()),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Command::Match(args) => run_match(args),
        Command::Check(args) => run_check(args),
        Command::Options(args) => run_options(args),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "docmatch_cli=debug,docmatch_core=debug,docmatch_help=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_match(args: MatchArgs) -> Result<(), CliError> {
    let document = load_document(&args.doc.doc)?;

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if args.no_help {
        settings.help = false;
    }
    if args.options_first {
        settings.options_first = true;
    }
    if let Some(version) = args.version_text {
        settings.version = Some(version);
    }
    debug!(?settings, argv = ?args.argv, "matching invocation");

    match document.run(&args.argv, &settings)? {
        Outcome::Matched(bindings) => {
            let rendered = format_bindings(&bindings, args.format).map_err(CliError::Failed)?;
            println!("{}", rendered.trim_end());
        }
        Outcome::Help(text) | Outcome::Version(text) => println!("{text}"),
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let document = load_document(&args.doc.doc)?;
    let pattern = document.pattern();

    println!("Pattern: {pattern}");
    println!("Leaves: {}", pattern.leaves().len());
    println!("Alternatives: {}", pattern.either_normal_form().len());
    println!("Options: {}", document.registry().len());
    Ok(())
}

fn run_options(args: OptionsArgs) -> Result<(), CliError> {
    let document = load_document(&args.doc.doc)?;
    let rendered = format_registry(document.registry(), args.format).map_err(CliError::Failed)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn load_document(path: &Path) -> Result<Document, CliError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::Failed(format!("failed to read stdin: {e}")))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::Failed(format!("failed to read {}: {e}", path.display())))?
    };
    Ok(Document::parse(&text)?)
}
