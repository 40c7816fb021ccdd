use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::models::{EncodedFile, UploadedFile};
use crate::names;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("file is {0} bytes, the limit is {max} bytes", max = names::MAX_FILE_BYTES)]
    TooLarge(usize),
    #[error("file data could not be decoded: {0}")]
    Undecodable(#[from] DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("not a data URL")]
    NotDataUrl,
    #[error("data URL is not base64 encoded")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Payload(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: RejectReason,
}

/// Files that passed the upload constraints plus the ones that did not.
#[derive(Debug, Default)]
pub struct EncodedBatch {
    pub files: Vec<EncodedFile>,
    pub rejected: Vec<RejectedFile>,
}

/// Strip MIME parameters and lowercase, e.g. `Text/Plain; charset=utf-8` -> `text/plain`.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_allowed_type(mime_type: &str) -> bool {
    let essence = essence(mime_type);
    names::ALLOWED_MIME_TYPES.contains(&essence.as_str())
}

fn check(mime_type: &str, size: usize) -> Result<(), RejectReason> {
    if !is_allowed_type(mime_type) {
        return Err(RejectReason::UnsupportedType(mime_type.to_string()));
    }
    if size > names::MAX_FILE_BYTES {
        return Err(RejectReason::TooLarge(size));
    }
    Ok(())
}

pub fn encode_file(file: &UploadedFile) -> EncodedFile {
    EncodedFile {
        name: file.name.clone(),
        mime_type: file.mime_type.clone(),
        data: format!(
            "data:{};base64,{}",
            essence(&file.mime_type),
            BASE64.encode(&file.bytes)
        ),
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL back to the original bytes.
pub fn decode(data: &str) -> Result<Vec<u8>, DecodeError> {
    let rest = data.strip_prefix("data:").ok_or(DecodeError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(DecodeError::NotDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(DecodeError::NotBase64);
    }
    BASE64
        .decode(payload.trim())
        .map_err(|e| DecodeError::Payload(e.to_string()))
}

/// Encode user files, excluding any that fail the type or size constraints.
pub fn encode_files(files: &[UploadedFile]) -> EncodedBatch {
    let mut batch = EncodedBatch::default();

    for file in files {
        match check(&file.mime_type, file.bytes.len()) {
            Ok(()) => batch.files.push(encode_file(file)),
            Err(reason) => {
                tracing::warn!("rejected upload {}: {reason}", file.name);
                batch.rejected.push(RejectedFile {
                    name: file.name.clone(),
                    reason,
                });
            }
        }
    }

    batch
}

/// Apply the upload constraints to files that arrived already encoded.
pub fn screen_encoded(files: Vec<EncodedFile>) -> EncodedBatch {
    let mut batch = EncodedBatch::default();

    for file in files {
        let verdict = decode(&file.data)
            .map_err(RejectReason::from)
            .and_then(|bytes| check(&file.mime_type, bytes.len()));

        match verdict {
            Ok(()) => batch.files.push(file),
            Err(reason) => {
                tracing::warn!("rejected upload {}: {reason}", file.name);
                batch.rejected.push(RejectedFile {
                    name: file.name,
                    reason,
                });
            }
        }
    }

    batch
}

/// Decoded file content for the prompt: UTF-8 text when possible, the data URL otherwise.
pub fn prompt_content(file: &EncodedFile) -> String {
    match decode(&file.data).map(String::from_utf8) {
        Ok(Ok(text)) => text,
        _ => file.data.clone(),
    }
}
