/// CLI: reads a JSON program tree from stdin or a file, emits C# to stdout.
///
/// Usage:
///   cs-codegen                      < tree.json > Generated.cs
///   cs-codegen tree.json                        > Generated.cs
///   cs-codegen --options opts.json --else-on-closing tree.json
///   cs-codegen --bracing c --indent 2 --deny-unsupported tree.json
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use cs_codegen::emit_cs;
use cs_codegen::loader::{self, LoadError};
use cs_codegen::options::{BracingStyle, GeneratorOptions};

#[derive(Parser)]
#[command(name = "cs-codegen", version, about = "Emit C# source from a JSON program tree")]
struct Cli {
    /// Program tree to read; stdin when omitted.
    input: Option<PathBuf>,

    /// JSON file with generator options. Flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Put `else`, `catch` and `finally` on the closing-brace line.
    #[arg(long)]
    else_on_closing: bool,

    #[arg(long, value_enum)]
    bracing: Option<Bracing>,

    /// Spaces per indentation level.
    #[arg(long)]
    indent: Option<usize>,

    /// Prefix identifiers that are C# keywords with `@`.
    #[arg(long)]
    escape_identifiers: bool,

    /// Fail instead of writing placeholders for unsupported members.
    #[arg(long)]
    deny_unsupported: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Bracing {
    /// `{` at the end of the header line.
    Block,
    /// `{` on its own line.
    C,
}

impl From<Bracing> for BracingStyle {
    fn from(b: Bracing) -> Self {
        match b {
            Bracing::Block => BracingStyle::Block,
            Bracing::C => BracingStyle::C,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Emit(#[from] emit_cs::EmitError),
    #[error("{count} unsupported member(s) in output")]
    Unsupported { count: usize },
    #[error("cannot write output: {0}")]
    Stdout(#[source] io::Error),
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let options = resolve_options(cli)?;

    let unit = match &cli.input {
        Some(path) => loader::load_compile_unit_file(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(CliError::Stdin)?;
            loader::load_compile_unit(&buf)?
        }
    };

    let generated = emit_cs::generate(&unit, &options)?;
    for item in &generated.unsupported {
        tracing::warn!("placeholder written for {item}");
    }
    if cli.deny_unsupported && !generated.is_complete() {
        return Err(CliError::Unsupported {
            count: generated.unsupported.len(),
        });
    }

    io::stdout()
        .lock()
        .write_all(generated.code.as_bytes())
        .map_err(CliError::Stdout)
}

fn resolve_options(cli: &Cli) -> Result<GeneratorOptions, LoadError> {
    let mut options = match &cli.options {
        Some(path) => GeneratorOptions::from_file(path)?,
        None => GeneratorOptions::default(),
    };
    if cli.else_on_closing {
        options.else_on_closing = true;
    }
    if let Some(bracing) = cli.bracing {
        options.bracing_style = bracing.into();
    }
    if let Some(n) = cli.indent {
        options.indent_string = " ".repeat(n);
    }
    if cli.escape_identifiers {
        options.escape_identifiers = true;
    }
    Ok(options)
}
