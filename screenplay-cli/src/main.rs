mod api;
mod cli;

use api::ClientError;
use clap::{CommandFactory, Parser};
use shared::models::GenerationResult;
use std::fmt::Write;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();
    if cli.scenario.trim().is_empty() {
        println!("Error: Scenario is required");
        cli::Cli::command().print_help()?;
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    match api::generate(&client, &cli.api, &cli.request()).await {
        Ok(result) => print!("{}", render(&result)),
        Err(e @ ClientError::Api { .. }) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn render(result: &GenerationResult) -> String {
    let mut out = String::from("\n===== GENERATED DIALOGUE =====\n");
    let _ = writeln!(out, "Scenario: {}\n", result.scenario);
    for exchange in &result.exchanges {
        let _ = writeln!(out, "{}: {}\n", exchange.character, exchange.line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::DialogueExchange;

    #[test]
    fn renders_banner_and_lines() {
        let result = GenerationResult {
            scenario: "A heist gone wrong".to_string(),
            exchanges: vec![
                DialogueExchange::new("Max", "Let's go."),
                DialogueExchange::new("Lena", "Not yet."),
            ],
        };
        assert_eq!(
            render(&result),
            "\n===== GENERATED DIALOGUE =====\nScenario: A heist gone wrong\n\nMax: Let's go.\n\nLena: Not yet.\n\n"
        );
    }

    #[test]
    fn api_error_prints_raw_body() {
        let error = ClientError::Api {
            status: 400,
            body: r#"{"error":"scenario required"}"#.to_string(),
        };
        assert_eq!(error.to_string(), r#"API Error: {"error":"scenario required"}"#);
    }
}
