mod cli;
mod demo;
mod infra;
mod render;

use credsaathi::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
