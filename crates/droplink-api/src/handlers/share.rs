//! Share creation, redemption, and file download handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use droplink_core::error::AppError;
use droplink_service::{CreateShareRequest, CreateShareResponse, FileUpload, RedeemedShare};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/shares — multipart form with `text`, `file`, and `expiry_hours`
/// fields, all optional but at least one payload field required.
pub async fn create_share(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<CreateShareResponse>>), ApiError> {
    let mut text: Option<String> = None;
    let mut expiry_hours: Option<u32> = None;
    let mut file: Option<FileUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "text" => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "expiry_hours" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                expiry_hours = Some(
                    raw.trim()
                        .parse::<u32>()
                        .map_err(|_| AppError::validation("Invalid expiry_hours"))?,
                );
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| "file".to_string());
                let content_type = field.content_type().map(String::from);
                let data: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                file = Some(FileUpload {
                    name: file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let created = state
        .share_service
        .create_share(CreateShareRequest {
            text,
            file,
            expiry_hours,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// GET /api/shares/{code} — redeems a code and returns the payload.
pub async fn redeem_share(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<RedeemedShare>>, ApiError> {
    let redeemed = state.share_service.redeem_share(&code).await?;
    Ok(Json(ApiResponse::ok(redeemed)))
}

/// GET /api/shares/{code}/file — streams the file payload of a share.
///
/// Does not bump the redemption counter; that happens when the share
/// itself is redeemed.
pub async fn download_file(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let (share, stream) = state.share_service.open_file(&code).await?;

    let content_type = share
        .file_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = share.file_name.unwrap_or_else(|| "file".to_string());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
        );
    if let Some(size) = share.file_size {
        builder = builder.header(header::CONTENT_LENGTH, size);
    }

    let response = builder
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
