use std::io;
use std::process::ExitCode;

use chrono::Local;
use recall_planner::app::Session;
use recall_planner::config::Config;
use recall_planner::logging::init_tracing;
use recall_planner::planner::Planner;
use recall_planner::quotes::random_quote;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.log_config());
    tracing::info!(task_file = %config.task_file.display(), "Starting recall-planner");

    // A corrupt task file stops start-up rather than being replaced by an empty plan.
    let planner = match Planner::open(&config.task_file) {
        Ok(planner) => planner,
        Err(e) => {
            tracing::error!(error = %e, "Failed to open task store");
            eprintln!("Cannot open {}: {e}", config.task_file.display());
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut session = Session::new(
        planner,
        Local::now().date_naive(),
        random_quote(&mut rand::thread_rng()),
        stdin.lock(),
        io::stdout(),
    );

    if let Err(e) = session.run() {
        tracing::error!(error = %e, "Terminal session failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
