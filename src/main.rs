use autotasks::{AutoTasks, AutoTasksError, Cli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::io;
use std::process;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    setup_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let autotasks = match AutoTasks::from_cli(&cli) {
        Ok(autotasks) => autotasks,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    // Operation failures are reported on screen; the exit code stays 0.
    if !cli.is_interactive() {
        if let Some(request) = cli.request(autotasks.config()) {
            autotasks.run_request(&request).await;
        }
        return 0;
    }

    let stdin = io::stdin();
    match autotasks.run_menu(stdin.lock(), io::stdout()).await {
        Ok(()) => 0,
        Err(e) => {
            autotasks.handle_error(&AutoTasksError::Io(e));
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "autotasks.toml".to_string());

    match AutoTasks::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  autotasks --config {}", config_path);
            0
        }
        Err(e) => {
            println!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                println!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &AutoTasksError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "autotasks=warn",
        1 => "autotasks=info",
        2 => "autotasks=debug",
        _ => "autotasks=trace",
    }
}

fn setup_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("autotasks {} started with verbosity {}", autotasks::version_info(), verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
