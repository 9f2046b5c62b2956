//! TQL CLI - Parse, check and format telemetry query statement files

mod config;
mod statements;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tql_ast::{ParsedQuery, ToTql};
use tql_parser::{parse_with, ParseError, ParserConfig};

use config::{Config, LoggingConfig};
use statements::Statement;

#[derive(Parser)]
#[command(name = "tql")]
#[command(about = "Telemetry query language tools", long_about = None)]
struct Cli {
    /// Config file (defaults to ./tql.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a statement file and output the AST as JSON
    Parse {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Check that every statement parses
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
    /// Print each statement in canonical form
    Fmt {
        /// Input file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    let ok = match cli.command {
        Commands::Parse { file, pretty } => cmd_parse(&file, pretty, &config.parser),
        Commands::Check { files } => cmd_check(&files, &config.parser),
        Commands::Fmt { file } => cmd_fmt(&file, &config.parser),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn cmd_parse(file: &Path, pretty: bool, config: &ParserConfig) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };
    let Some(queries) = parse_file(&source, file, config) else {
        return false;
    };

    let json = if pretty {
        serde_json::to_string_pretty(&queries)
    } else {
        serde_json::to_string(&queries)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error serializing AST: {}", e);
            false
        }
    }
}

fn cmd_check(files: &[PathBuf], config: &ParserConfig) -> bool {
    let mut all_ok = true;

    for file in files {
        let Some(source) = read_source(file) else {
            all_ok = false;
            continue;
        };

        let statements = statements::split(&source);
        let mut failed = 0;
        for statement in &statements {
            if let Err(e) = parse_with(statement.text, config) {
                report_parse_error(&source, file, statement, &e);
                failed += 1;
            }
        }

        if failed == 0 {
            println!("✓ {} - {} statements", file.display(), statements.len());
        } else {
            eprintln!(
                "✗ {} - {} of {} statements failed",
                file.display(),
                failed,
                statements.len()
            );
            all_ok = false;
        }
    }

    all_ok
}

fn cmd_fmt(file: &Path, config: &ParserConfig) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };
    let Some(queries) = parse_file(&source, file, config) else {
        return false;
    };

    for query in &queries {
        println!("{}", query.to_tql());
    }
    true
}

fn read_source(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            None
        }
    }
}

/// Parse every statement, reporting each failure; `None` if any failed
fn parse_file(source: &str, file: &Path, config: &ParserConfig) -> Option<Vec<ParsedQuery>> {
    let statements = statements::split(source);
    debug!(file = %file.display(), statements = statements.len(), "parsing statement file");

    let mut queries = Vec::with_capacity(statements.len());
    let mut ok = true;
    for statement in &statements {
        match parse_with(statement.text, config) {
            Ok(query) => queries.push(query),
            Err(e) => {
                report_parse_error(source, file, statement, &e);
                ok = false;
            }
        }
    }

    ok.then_some(queries)
}

fn report_parse_error(source: &str, file: &Path, statement: &Statement<'_>, error: &ParseError) {
    let name = file.to_string_lossy().to_string();
    let span = error.span().offset(statement.offset);
    let result = Report::build(ReportKind::Error, name.clone(), span.start)
        .with_message(format!("line {}: {}", statement.line, error))
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));

    if let Err(e) = result {
        eprintln!("{}: {}", file.display(), error);
        debug!(error = %e, "failed to render diagnostic");
    }
}
