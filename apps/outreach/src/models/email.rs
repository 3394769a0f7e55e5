use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::models::contact::{ContactId, OutgoingContact};
use crate::models::profile::UserProfile;

/// Largest resume the backend accepts.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeMime {
    Pdf,
    Doc,
    Docx,
}

impl ResumeMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeMime::Pdf => "application/pdf",
            ResumeMime::Doc => "application/msword",
            ResumeMime::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        [ResumeMime::Pdf, ResumeMime::Doc, ResumeMime::Docx]
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(mime.trim()))
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(ResumeMime::Pdf),
            "doc" => Some(ResumeMime::Doc),
            "docx" => Some(ResumeMime::Docx),
            _ => None,
        }
    }
}

/// A resume ready to upload. Construction enforces type and size limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    file_name: String,
    mime: ResumeMime,
    bytes: Bytes,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        mime: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, ApiError> {
        let mime = ResumeMime::from_mime(mime)
            .ok_or_else(|| ApiError::Validation("Please upload PDF, DOC or DOCX only".into()))?;
        Self::checked(file_name.into(), mime, bytes.into())
    }

    /// Reads a resume from disk, taking its type from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ResumeMime::from_extension)
            .ok_or_else(|| ApiError::Validation("Please upload PDF, DOC or DOCX only".into()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::Validation(format!("Could not read resume {}: {e}", path.display()))
        })?;
        Self::checked(file_name, mime, Bytes::from(bytes))
    }

    fn checked(file_name: String, mime: ResumeMime, bytes: Bytes) -> Result<Self, ApiError> {
        if bytes.len() > MAX_RESUME_BYTES {
            return Err(ApiError::Validation("File must be under 5 MB".into()));
        }
        if bytes.is_empty() {
            return Err(ApiError::Validation("Resume file is empty".into()));
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> ResumeMime {
        self.mime
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0 / 1024.0
    }
}

/// Everything that goes into the multipart body of `POST /emails/bulk-send`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkSendForm {
    pub resume: ResumeFile,
    pub contacts: Vec<OutgoingContact>,
    pub user_profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendResult {
    #[serde(default)]
    pub success_count: Option<u32>,
    #[serde(default)]
    pub failed_count: Option<u32>,
}

/// A row of `GET /emails/logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailLog {
    #[serde(default)]
    pub contact_id: Option<ContactId>,
    #[serde(default, alias = "recipientEmail", alias = "email")]
    pub recipient_email: String,
    #[serde(default, alias = "companyName")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, alias = "sentAt")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "errorMessage")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl EmailLogQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailStats {
    #[serde(default, alias = "totalSent")]
    pub total_sent: u64,
    #[serde(default, alias = "totalFailed")]
    pub total_failed: u64,
    #[serde(default, alias = "sentToday")]
    pub sent_today: Option<u64>,
    #[serde(default, alias = "successRate")]
    pub success_rate: Option<f64>,
}
