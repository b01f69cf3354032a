//! Command-line front end for the ModelSim backend.

use clap::{ArgAction, Parser, Subcommand};
use edatool::{EdaError, EdaResult, EdaTool, Edam, Session};
use edatool_modelsim::Modelsim;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "eda-modelsim", version, about = "Configure, build and run ModelSim simulations from an EDAM description")]
struct Cli {
    /// EDAM project description (JSON)
    #[arg(long, global = true)]
    edam: Option<PathBuf>,

    /// Directory for generated files
    #[arg(long, global = true, default_value = "build")]
    work_root: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the Makefile and Tcl scripts
    Configure,
    /// Compile the design and VPI modules
    Build,
    /// Run the simulation; trailing `--name=value` arguments override parameters
    Run {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the backend's options as JSON
    Doc,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn session(cli: &Cli) -> EdaResult<Session> {
    let path = cli
        .edam
        .as_ref()
        .ok_or_else(|| EdaError::edam("no description given (use --edam)", None::<std::io::Error>))?;
    Ok(Session::new(Edam::load(path)?, cli.work_root.clone()))
}

fn execute(cli: &Cli) -> EdaResult<()> {
    let tool = Modelsim::new();
    match &cli.command {
        Commands::Configure => {
            let report = session(cli)?.configure(&tool)?;
            for path in &report.artifacts {
                println!("{}", path.display());
            }
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
            Ok(())
        }
        Commands::Build => session(cli)?.build(&tool),
        Commands::Run { args } => session(cli)?.run(&tool, args),
        Commands::Doc => {
            let doc = serde_json::to_string_pretty(&tool.doc())
                .map_err(|e| EdaError::edam("Failed to serialize tool doc", Some(e)))?;
            println!("{doc}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            // Keep the tool's exit code so callers can tell simulation failures apart
            match e {
                EdaError::ToolFailed {
                    code: Some(code), ..
                } => ExitCode::from(code.clamp(1, 255) as u8),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
