//! Create a share from text and/or a local file.

use std::path::PathBuf;

use clap::Args;

use droplink_core::error::AppError;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

/// Arguments for the send command
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Text snippet to share
    #[arg(short, long)]
    pub text: Option<String>,

    /// Path to a file to share
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Expiry in hours
    #[arg(short, long = "expires")]
    pub expiry_hours: Option<u32>,
}

/// Execute the send command
pub async fn execute(args: &SendArgs, server: &str, format: OutputFormat) -> Result<(), AppError> {
    if args.text.is_none() && args.file.is_none() {
        return Err(AppError::validation("Provide --text and/or --file"));
    }

    let mut form = reqwest::multipart::Form::new();

    if let Some(ref text) = args.text {
        form = form.text("text", text.clone());
    }

    if let Some(ref hours) = args.expiry_hours {
        form = form.text("expiry_hours", hours.to_string());
    }

    if let Some(ref path) = args.file {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::validation(format!("Cannot read {}: {e}", path.display())))?;
        form = form.part(
            "file",
            reqwest::multipart::Part::bytes(data).file_name(file_name),
        );
    }

    let client = ApiClient::new(server);
    let created = client.create_share(form).await?;

    match format {
        OutputFormat::Json => output::print_json(&created),
        OutputFormat::Plain => {
            let code = created
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or_default();
            let expires_at = created
                .get("expires_at")
                .and_then(|e| e.as_str())
                .unwrap_or_default();
            output::print_success(&format!("Share created: {}", code));
            println!("  Expires: {}", expires_at);
        }
    }

    Ok(())
}
