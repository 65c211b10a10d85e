use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use teenytiny::config::{Config, TraceFormat};
use teenytiny::error::CompilerError;
use teenytiny::lexer::Lexer;
use teenytiny::token::Kind;
use teenytiny::trace::TraceEvent;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(author, version, about = "Teeny Tiny lexer and parser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kind of every token in a source file
    Lex {
        file: PathBuf,
        /// Print full tokens as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Check a source file against the grammar and print the rule trace
    Parse {
        file: PathBuf,
        /// Trace output format, overrides the config file
        #[arg(long, value_enum)]
        format: Option<TraceFormat>,
    },
    /// Manage the driver configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Write the default configuration file
    Init,
}

fn read_source(path: &Path) -> Result<String, CompilerError> {
    if !path.is_file() {
        return Err(CompilerError::FileNotFound(format!(
            "Source file not found: {}",
            path.display()
        )));
    }

    Ok(fs::read_to_string(path)?)
}

fn lex_file(path: &Path, json: bool) -> Result<(), CompilerError> {
    let source = read_source(path)?;

    for token in Lexer::new(&source) {
        let token = token?;
        if token.kind == Kind::Eof {
            break;
        }
        if json {
            println!("{}", serde_json::to_string(&token).map_err(std::io::Error::from)?);
        } else {
            println!("{}", token.kind);
        }
    }

    Ok(())
}

fn print_trace(events: &[TraceEvent], format: TraceFormat) -> Result<(), CompilerError> {
    for event in events {
        match format {
            TraceFormat::Text => println!("{}", event),
            TraceFormat::Json => {
                println!("{}", serde_json::to_string(event).map_err(std::io::Error::from)?)
            }
        }
    }
    Ok(())
}

fn parse_file(path: &Path, format: TraceFormat) -> Result<(), CompilerError> {
    let source = read_source(path)?;

    let mut events: Vec<TraceEvent> = Vec::new();
    let result = teenytiny::parse_into(&source, &mut events);
    tracing::info!(path = %path.display(), rules = events.len(), ok = result.is_ok(), "parsed");

    print_trace(&events, format)?;
    result?;

    if format == TraceFormat::Text {
        println!("Parsing completed.");
    }
    Ok(())
}

fn run(cli: Cli, config: &Config) -> Result<(), CompilerError> {
    match cli.command {
        Commands::Lex { file, json } => lex_file(&file, json),
        Commands::Parse { file, format } => {
            parse_file(&file, format.unwrap_or(config.trace_format))
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("{}", config.to_json().map_err(std::io::Error::from)?);
                Ok(())
            }
            ConfigCommands::Init => {
                let config_path = Config::get_config_path();
                if config_path.exists() {
                    println!("Config file already exists at: {}", config_path.display());
                } else {
                    Config::default().save()?;
                    println!("Initialized new config file at: {}", config_path.display());
                }
                Ok(())
            }
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Warning: using default configuration. {}", err);
        Config::default()
    });

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
