mod analyzer;
mod config;
mod dispatcher;
mod fetcher;
mod model;
mod normalizer;
#[cfg(feature = "gui")]
mod ui;
mod utils;

use config::load_config;
use dispatcher::{CommandDispatcher, FAREWELL, Reply, render_error};
use fetcher::{CoinGeckoFetcher, MarketDataFetcher};
use model::DispatchError;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.json";

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config = match load_config(CONFIG_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            eprintln!("Could not read {}: {}", CONFIG_PATH, e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match CoinGeckoFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let dispatcher = CommandDispatcher::new(fetcher, config.coin.clone(), config.currency.clone());
    info!("Analyzing {} in {}", config.coin, config.currency);

    let args: Vec<String> = std::env::args().skip(1).collect();

    #[cfg(feature = "gui")]
    if args.first().is_some_and(|arg| arg == "--gui") {
        return match ui::launch(dispatcher) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Form failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.is_empty() {
        match runtime.block_on(run_prompt(&dispatcher)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Input error: {}", e);
                ExitCode::FAILURE
            }
        }
    } else {
        runtime.block_on(run_once(&dispatcher, &args.join(" ")))
    }
}

/// Reads commands from stdin until `quit`, `exit` or end of input.
async fn run_prompt<F: MarketDataFetcher>(dispatcher: &CommandDispatcher<F>) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type help for a list of commands.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            println!("{}", FAREWELL);
            return Ok(());
        };

        match dispatcher.dispatch(&line).await {
            Ok(Reply::Nothing) => {}
            Ok(Reply::Text(text)) | Ok(Reply::Help(text)) => println!("{}", text),
            Ok(Reply::Quit(text)) => {
                println!("{}", text);
                return Ok(());
            }
            Err(e) => {
                report_failure(&e);
                println!("{}", render_error(&e));
            }
        }
    }
}

/// Dispatches a single command given on the command line.
async fn run_once<F: MarketDataFetcher>(dispatcher: &CommandDispatcher<F>, line: &str) -> ExitCode {
    match dispatcher.dispatch(line).await {
        Ok(reply) => {
            if let Some(text) = reply.text() {
                println!("{}", text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&e);
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn report_failure(error: &DispatchError) {
    match error {
        DispatchError::Command(e) => warn!("Rejected input: {}", e),
        DispatchError::Fetch(e) => warn!("Query failed: {:?}", e),
    }
}
