//! `sonargate` 바이너리 진입점.

use sonargate::domain::review::SummaryAction;
use sonargate::interface::cli::{AppComposition, Cli, CliAction};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        },
        CliAction::Sync(options) => {
            match composition.sync_report_usecase().execute(options).await {
                Ok(outcome) => {
                    let summary = match outcome.summary_action {
                        SummaryAction::Created => "summary created",
                        SummaryAction::Updated => "summary updated",
                        SummaryAction::Previewed => "previewed only",
                    };
                    println!(
                        "{summary}; {} created, {} updated, {} deleted, {} unchanged, {} skipped",
                        outcome.created,
                        outcome.updated,
                        outcome.deleted,
                        outcome.stable,
                        outcome.skipped
                    );
                    println!(
                        "quality gate: {}",
                        if outcome.gate_passed { "passed" } else { "failed" }
                    );
                }
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
    }
}
