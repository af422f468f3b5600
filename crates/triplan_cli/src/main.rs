//! CLI entry point.
//!
//! # Responsibility
//! - Load `.env` and environment configuration, then start file logging.
//! - Run the scripted trip workflow against the default tool registry.
//! - Print each tool call and the calendar path.

use log::warn;
use std::process::ExitCode;
use triplan_core::{
    core_version, init_logging, AppConfig, ItineraryService, ToolRegistry, TripWorkflow,
};

fn main() -> ExitCode {
    // A missing .env file is normal; variables may come from the shell.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("triplan: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("triplan: logging disabled: {err}");
    }
    if config.api_key.is_none() {
        warn!("event=config_load module=cli status=degraded error_code=api_key_missing");
        eprintln!("triplan: OPENAI_API_KEY is not set; running the scripted workflow only");
    }

    println!("triplan {}", core_version());

    let registry = match ToolRegistry::travel_defaults() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("triplan: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut itinerary = ItineraryService::from_config(&config);

    match TripWorkflow::default().run(&registry, &mut itinerary) {
        Ok(report) => {
            for step in &report.steps {
                println!("[{}] {}", step.tool, step.output);
            }
            println!(
                "\n{} event(s). Open {} to see the full itinerary.",
                report.event_count,
                report.calendar_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("triplan: workflow failed: {err}");
            ExitCode::FAILURE
        }
    }
}
