use futures::future::join_all;

use crate::domain::repository::MediaStore;
use crate::domain::types::PropertyImage;
use crate::error::MarketplaceError;

pub const PROPERTY_FOLDER: &str = "properties";
pub const VERIFICATION_FOLDER: &str = "verification_docs";

/// `data:<mime>;base64,<payload>` with a non-empty payload.
pub fn is_data_uri(s: &str, mime_prefix: &str) -> bool {
    let Some(rest) = s.strip_prefix("data:") else {
        return false;
    };
    match rest.split_once(";base64,") {
        Some((mime, payload)) => mime.starts_with(mime_prefix) && !payload.is_empty(),
        None => false,
    }
}

/// Upload every payload concurrently. On any failure the successful uploads
/// are destroyed again and the first error is returned.
pub async fn upload_all<M: MediaStore>(
    media: &M,
    payloads: &[String],
    folder: &str,
) -> Result<Vec<PropertyImage>, MarketplaceError> {
    let results = join_all(payloads.iter().map(|p| media.upload(p, folder))).await;

    let mut uploaded = Vec::with_capacity(results.len());
    let mut first_error = None;
    for result in results {
        match result {
            Ok(image) => uploaded.push(image),
            Err(e) if first_error.is_none() => first_error = Some(e),
            Err(e) => tracing::warn!(error = %e, "additional image upload failed"),
        }
    }
    match first_error {
        None => Ok(uploaded),
        Some(e) => {
            discard(media, &uploaded).await;
            Err(e)
        }
    }
}

/// Best-effort removal from the image store; failures are logged only.
pub async fn discard<M: MediaStore>(media: &M, images: &[PropertyImage]) {
    let ids = images.iter().filter_map(|i| i.public_id.as_deref());
    let results = join_all(ids.map(|id| async move { (id, media.destroy(id).await) })).await;
    for (public_id, result) in results {
        if let Err(e) = result {
            tracing::warn!(error = %e, public_id, "image cleanup failed");
        }
    }
}
