mod cli;
mod commands;

use training_reports::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
