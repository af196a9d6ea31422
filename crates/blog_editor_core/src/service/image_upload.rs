//! Image upload seam with local fallback.
//!
//! # Responsibility
//! - Hand cropped image bytes to a host-provided uploader.
//! - Fall back to an ephemeral local reference when the upload fails.
//!
//! # Invariants
//! - Resolution never fails; failures are logged at `warn` only.
//! - A blank URL returned by the uploader counts as a failure.

use crate::model::id::ContentId;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const LOCAL_REFERENCE_PREFIX: &str = "blob:local/";

/// Upload failures reported by an uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    EmptyPayload,
    EmptyUrl,
    Rejected(String),
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "image payload is empty"),
            Self::EmptyUrl => write!(f, "uploader returned an empty url"),
            Self::Rejected(reason) => write!(f, "upload rejected: {reason}"),
        }
    }
}

impl Error for UploadError {}

/// Host-side image storage.
///
/// The host awaits its own async transport and reports the outcome here.
pub trait ImageUploader {
    fn upload(&self, bytes: &[u8], mime_type: &str) -> Result<String, UploadError>;
}

/// Where an image subcard's `url` came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageUrl {
    Uploaded(String),
    /// Session-only reference; lost when the page goes away.
    LocalFallback(String),
}

impl ImageUrl {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Uploaded(url) | Self::LocalFallback(url) => url.as_str(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalFallback(_))
    }
}

/// Uploads `bytes`, or falls back to a local reference on any failure.
pub fn resolve_image_url(uploader: &dyn ImageUploader, bytes: &[u8], mime_type: &str) -> ImageUrl {
    let result = if bytes.is_empty() {
        Err(UploadError::EmptyPayload)
    } else {
        uploader
            .upload(bytes, mime_type)
            .and_then(|url| match url.trim() {
                "" => Err(UploadError::EmptyUrl),
                trimmed => Ok(trimmed.to_string()),
            })
    };

    match result {
        Ok(url) => {
            info!(
                "event=image_upload module=upload status=ok bytes={} mime={}",
                bytes.len(),
                mime_type
            );
            ImageUrl::Uploaded(url)
        }
        Err(err) => {
            warn!(
                "event=image_upload module=upload status=fallback bytes={} mime={} reason={}",
                bytes.len(),
                mime_type,
                err
            );
            ImageUrl::LocalFallback(format!("{LOCAL_REFERENCE_PREFIX}{}", ContentId::generate()))
        }
    }
}
