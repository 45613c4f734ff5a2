use clap::Parser;
use std::process::ExitCode;

use fitness_tracker_lib::commands::Cli;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  match fitness_tracker_lib::run(cli).await {
    Ok(output) => {
      if !output.is_empty() {
        println!("{}", output);
      }
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("Error: {}", e);
      ExitCode::FAILURE
    }
  }
}
