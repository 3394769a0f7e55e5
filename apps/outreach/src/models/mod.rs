pub mod contact;
pub mod email;
pub mod profile;
pub mod response;

pub use contact::{Contact, ContactDraft, ContactId, OutgoingContact};
pub use email::{
    BulkSendForm, BulkSendResult, EmailLog, EmailLogQuery, EmailStats, ResumeFile, ResumeMime,
};
pub use profile::{Settings, UserProfile};
pub use response::ApiResponse;
