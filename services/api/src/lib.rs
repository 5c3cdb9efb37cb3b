mod cli;
mod infra;
mod ingest;
mod routes;
mod server;

use rwax_oracle::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
