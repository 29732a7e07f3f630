//! Redeem a share code and retrieve its payload.

use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use clap::Args;
use serde_json::Value;

use droplink_core::error::AppError;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

/// Arguments for the receive command
#[derive(Debug, Args)]
pub struct ReceiveArgs {
    /// The share code to redeem
    pub code: String,

    /// Directory to save the file payload into
    #[arg(short, long = "out", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the payload without saving the file
    #[arg(long)]
    pub no_save: bool,
}

/// Execute the receive command
pub async fn execute(
    args: &ReceiveArgs,
    server: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let client = ApiClient::new(server);
    let share = client.redeem_share(&args.code).await?;

    if format == OutputFormat::Json {
        output::print_json(&share);
        if args.no_save {
            return Ok(());
        }
    }

    if let Some(text) = share.get("text").and_then(|t| t.as_str()) {
        if format == OutputFormat::Plain {
            println!("{}", text);
        }
    }

    if let Some(file) = share.get("file").filter(|f| !f.is_null()) {
        if args.no_save {
            if format == OutputFormat::Plain {
                let name = file.get("name").and_then(|n| n.as_str()).unwrap_or("file");
                output::print_warning(&format!("Skipping file '{}' (--no-save)", name));
            }
        } else {
            save_file(&client, file, &args.out_dir).await?;
        }
    }

    Ok(())
}

/// Fetches the file payload and writes it into the output directory.
async fn save_file(client: &ApiClient, file: &Value, out_dir: &PathBuf) -> Result<(), AppError> {
    let name = file
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("file")
        .to_string();

    let data = if let Some(data_url) = file.get("data_url").and_then(|u| u.as_str()) {
        decode_data_url(data_url)?
    } else if let Some(url) = file.get("download_url").and_then(|u| u.as_str()) {
        client.fetch_bytes(url).await?
    } else {
        return Err(AppError::internal("Share file payload carries no URL"));
    };

    // Strip any path components from the server-provided name.
    let safe_name = name.rsplit(['/', '\\']).next().unwrap_or("file");
    let target = out_dir.join(safe_name);

    tokio::fs::write(&target, &data)
        .await
        .map_err(|e| AppError::internal(format!("Cannot write {}: {e}", target.display())))?;

    output::print_success(&format!(
        "Saved {} ({} bytes)",
        target.display(),
        data.len()
    ));
    Ok(())
}

/// Decodes a `data:<mime>;base64,<payload>` URL into raw bytes.
fn decode_data_url(url: &str) -> Result<Vec<u8>, AppError> {
    let encoded = url
        .split_once(";base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| AppError::internal("Malformed data URL in share payload"))?;
    BASE64
        .decode(encoded)
        .map_err(|e| AppError::internal(format!("Invalid base64 in data URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        let decoded = decode_data_url("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded, b"hello");
    }

    #[test]
    fn test_decode_rejects_plain_url() {
        assert!(decode_data_url("https://example.com/file").is_err());
    }
}
