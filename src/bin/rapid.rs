//! RAPID command-line entry point.
//!
//! Loads configuration and the session file, settles the base URL scheme,
//! then hands control to the REPL. Logging goes to stderr (`RUST_LOG`,
//! default `warn`) so it never mixes with REPL output.

use clap::Parser;
use rapid::config::{self, RapidConfig};
use rapid::executor::{resolve_base_url, ExecutionConfig};
use rapid::interpreter::Interpreter;
use rapid::{repl, session};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rapid", version, about = "Rapid API Dialogue: explore HTTP APIs interactively")]
struct Cli {
    /// Base URL of the API, e.g. api.example.com or http://localhost:8080
    base_url: Option<String>,

    /// Session file with saved variables and headers
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Use http:// for a base URL without a scheme instead of probing https
    #[arg(long)]
    no_probe: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("rapid: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let Some(raw_base_url) = cli.base_url.as_deref() else {
        print_banner();
        return Ok(());
    };

    let mut config = load_configuration(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
        config.validate()?;
    }

    let session_path = cli
        .session
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.session_file));
    let store = match session::load_session(&session_path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("ignoring session file {}: {}", session_path.display(), err);
            Default::default()
        }
    };

    let execution = ExecutionConfig::from_config(&config);
    let client = execution.build_client()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let probe = if cli.no_probe {
        None
    } else {
        Some(execution.build_probe_client()?)
    };
    let base_url = runtime.block_on(resolve_base_url(raw_base_url, probe.as_ref()))?;

    println!("RAPID connected to {}", base_url);
    println!();

    let mut interpreter = Interpreter::new(base_url, store, client);
    let stdin = io::stdin();
    if stdin.is_terminal() {
        repl::run(&mut interpreter, &runtime)?;
    } else {
        repl::run_script(stdin.lock(), &mut interpreter, &runtime, &mut io::stdout())?;
    }

    if config.save_session_on_exit {
        session::save_session(&session_path, interpreter.store())?;
    }

    Ok(())
}

/// Configuration from `--config`, then `RAPID_CONFIG`, then `.rapidrc.json`.
fn load_configuration(flag: Option<&Path>) -> Result<RapidConfig, String> {
    let path = match flag {
        Some(path) => path.to_path_buf(),
        None => std::env::var_os(config::CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE)),
    };
    config::load_config_file(&path)
}

fn print_banner() {
    println!("RAPID v{} - Rapid API Dialogue", env!("CARGO_PKG_VERSION"));
    println!("Usage: rapid <base-url> [--session FILE] [--config FILE] [--timeout MS] [--no-probe]");
    println!();
    println!("Type ? inside a session for the command list.");
}
