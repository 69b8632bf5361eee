//! Request utilities.

use actix_web::web::{Bytes, BytesMut, Payload};
use futures::stream::StreamExt;

use crate::{Result, ServerError};

/// Convert Actix payload to bytes.
pub async fn convert_payload_to_bytes(payload: &mut Payload) -> Result<Bytes> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ServerError::PayloadError { source: e })?;
        body.extend_from_slice(&chunk);
    }

    Ok(body.freeze())
}

/// Extract a field from an `application/x-www-form-urlencoded` body.
///
/// When the field is repeated, the first occurrence wins.
pub fn extract_form_field(body: &[u8], field: &str) -> Result<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|e| ServerError::FormDecodeError { source: e })?;

    pairs
        .into_iter()
        .find_map(|(key, value)| (key == field).then_some(value))
        .ok_or_else(|| ServerError::MissingPayloadField {
            field: field.into(),
        })
}
