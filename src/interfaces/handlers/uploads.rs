use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use tracing::instrument;

use crate::{
    entities::image::{is_image_mime, ImageUpload, MAX_IMAGE_BYTES},
    errors::AppError,
    use_cases::extractors::AuthClaims,
    AppState,
};

const UPLOAD_CSP: &str = "default-src 'none'; sandbox";
const SVG_MIME: &str = "image/svg+xml";

/// Accepts exactly one file part. The declared type is checked before any
/// bytes are read and the stream is abandoned as soon as it passes the size
/// limit.
#[instrument(skip(claims, state, payload), fields(user = %claims.0.sub))]
pub async fn upload_image(
    claims: AuthClaims,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<impl Responder, AppError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(mut field) = payload.try_next().await? {
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let Some(file_name) = file_name else {
            // plain form fields carry nothing we need
            while field.try_next().await?.is_some() {}
            continue;
        };

        if upload.is_some() {
            return Err(AppError::InvalidInput("Only one file may be uploaded at a time".into()));
        }

        let declared_type = field
            .content_type()
            .map(|m| m.essence_str().to_ascii_lowercase())
            .unwrap_or_default();

        if !is_image_mime(&declared_type) {
            return Err(AppError::UnsupportedMediaType("Only image files are allowed".into()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image exceeds the {} MB limit",
                    MAX_IMAGE_BYTES / (1024 * 1024)
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        upload = Some(ImageUpload {
            file_name: Some(file_name),
            declared_type,
            bytes,
        });
    }

    let upload = upload.ok_or_else(|| AppError::InvalidInput("No file was uploaded".into()))?;
    let stored = state.image_handler.upload_image(upload).await?;

    Ok(HttpResponse::Created().json(stored))
}

#[instrument(skip(state))]
pub async fn serve_upload(
    key: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let object = state.image_handler.fetch_image(&key).await?;

    let mut response = HttpResponse::Ok();
    response
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .insert_header((header::CONTENT_SECURITY_POLICY, UPLOAD_CSP));

    // SVG can carry script; never render it inline from our origin
    if object.content_type == SVG_MIME {
        response.insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", key.as_str())));
    }

    Ok(response.content_type(object.content_type).body(object.bytes))
}
