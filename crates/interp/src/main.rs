//! seqd CLI
//!
//! Command-line interface for running and checking seqd programs.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use seqd::{Interpreter, LogTracer, Loader, OutputFormat, RunConfig, report};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser)]
#[command(name = "seqd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "seqd - run pattern/sequence register machine programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and print its output and registers
    Run {
        /// Source file, or `-` for stdin
        input: PathBuf,

        /// Run configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Log every phase and instruction to stderr
        #[arg(long)]
        trace: bool,

        /// Omit the register listing
        #[arg(long)]
        no_registers: bool,

        /// Exit with failure if any instruction failed
        #[arg(long)]
        strict: bool,
    },

    /// Load a program without running it
    Check {
        /// Source file, or `-` for stdin
        input: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            config,
            format,
            trace,
            no_registers,
            strict,
        } => {
            let mut run_config = match config {
                Some(path) => RunConfig::load(&path).unwrap_or_else(|e| fail(&e)),
                None => RunConfig::default(),
            };
            if let Some(format) = format {
                run_config = run_config.with_format(format);
            }
            if trace {
                run_config = run_config.with_trace(true);
            }
            if no_registers {
                run_config = run_config.with_show_registers(false);
            }
            if strict {
                run_config = run_config.with_strict(true);
            }
            run_program(&input, &run_config);
        }
        Commands::Check { input } => run_check(&input),
        Commands::Completions { shell } => run_completions(shell),
    }
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "seqd", &mut io::stdout());
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "seqd=trace"
            .parse()
            .unwrap_or_else(|e| fail(&format!("Invalid log directive: {}", e))),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_program(input: &Path, config: &RunConfig) {
    let source = read_source(input).unwrap_or_else(|e| fail(&e));

    let mut interpreter = Interpreter::new();
    if config.trace {
        init_logging();
        interpreter = interpreter.with_tracer(LogTracer);
    }
    let result = interpreter.interpret(&source);

    match config.format {
        OutputFormat::Text => {
            print!("{}", report::render_text(&result, config.show_registers));
            for diagnostic in &result.diagnostics {
                eprintln!("{}", diagnostic);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Failed to serialize result: {}", e)),
        },
    }

    if config.strict && result.has_errors() {
        process::exit(1);
    }
}

fn run_check(input: &Path) {
    let source = read_source(input).unwrap_or_else(|e| fail(&e));
    let loaded = Loader::new().load(&source);
    print!("{}", report::render_loaded(&loaded));
    for diagnostic in &loaded.diagnostics {
        eprintln!("{}", diagnostic);
    }
}

fn read_source(input: &Path) -> Result<String, String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(source);
    }
    std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read source file '{}': {}", input.display(), e))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}
