use anyhow::Context;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    DatabaseManager::migrate()
        .await
        .context("failed to apply database migrations")?;
    DatabaseManager::close().await;

    output_success(&output_format, "Database migrations applied", None)
}
