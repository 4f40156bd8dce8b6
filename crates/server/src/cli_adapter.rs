use leads_core::{adapters::config::app_config::AppConfig, LeadService};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::http_adapter;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    MigrateLegacy { source: String },
}

pub struct CliAdapter {
    config: AppConfig,
    lead_service: Arc<LeadService>,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("config", &self.config)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(config: AppConfig, lead_service: Arc<LeadService>) -> Self {
        Self {
            config,
            lead_service,
        }
    }

    #[instrument]
    pub async fn run(&self, args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        match parse_args(&args)? {
            Command::Serve => {
                http_adapter::serve(&self.config.server, Arc::clone(&self.lead_service)).await?;
                Ok(())
            }
            Command::MigrateLegacy { source } => {
                let migrated = self
                    .lead_service
                    .migrate_legacy_rows(&source.as_str().into())
                    .await
                    .map_err(|report| format!("Migration failed: {:?}", report))?;
                info!("✅ Migrated {} rows from {}", migrated, source);
                Ok(())
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, CommandError> {
    match args.get(1).map(|s| s.as_str()) {
        None | Some("serve") => Ok(Command::Serve),
        Some("migrate-legacy") => {
            let source = args
                .get(2)
                .ok_or_else(|| CommandError::InvalidCommand {
                    details: "Source range required, e.g. migrate-legacy \"'leads_v1'!A2:H\""
                        .to_string(),
                })?
                .clone();
            Ok(Command::MigrateLegacy { source })
        }
        Some(other) => Err(CommandError::InvalidCommand {
            details: format!("Unknown command '{}', expected serve or migrate-legacy", other),
        }),
    }
}
