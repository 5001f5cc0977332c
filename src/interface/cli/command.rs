//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "sonargate")]
#[command(about = "Sync SonarQube quality gate reports into GitHub PR reviews")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// PR URL
    url: Option<String>,

    /// Print markdown to stdout, do not post
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and token resolution
    Config,
}

pub enum CliAction {
    InspectConfig,
    Sync(RunOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        let cli = Cli::parse();

        match cli.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            None => {
                let Some(url) = cli.url else {
                    return Err("a PR URL is required (or use the `config` subcommand)".into());
                };

                Ok(CliAction::Sync(RunOptions {
                    url,
                    dry_run: cli.dry_run,
                }))
            }
        }
    }
}
