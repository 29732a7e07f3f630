//! Show server health.

use droplink_core::error::AppError;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

/// Execute the status command
pub async fn execute(server: &str, format: OutputFormat) -> Result<(), AppError> {
    let client = ApiClient::new(server);
    let health = client.health_detailed().await?;

    match format {
        OutputFormat::Json => output::print_json(&health),
        OutputFormat::Plain => {
            let field = |key: &str| {
                health
                    .get(key)
                    .map(|v| {
                        v.as_str()
                            .map(String::from)
                            .unwrap_or_else(|| v.to_string())
                    })
                    .unwrap_or_default()
            };
            println!("Server:     {}", server);
            println!("Status:     {}", field("status"));
            println!(
                "Repository: {} ({})",
                field("repository"),
                field("repository_provider")
            );
            println!(
                "Storage:    {} ({})",
                field("storage"),
                field("storage_provider")
            );
            println!("Shares:     {}", field("share_count"));
        }
    }

    Ok(())
}
