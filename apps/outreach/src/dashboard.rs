use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, BulkSendResult, Contact, ContactDraft, ContactId, ResumeFile, UserProfile,
};

/// Local session state mirrored from the backend: the contact list, the resume
/// attached for sending, and how many emails went out.
///
/// Every mutation is applied only after the backend reports success, so a
/// failed call leaves the session exactly as it was.
pub struct Dashboard {
    api: ApiClient,
    contacts: Vec<Contact>,
    resume: Option<ResumeFile>,
    profile: Option<UserProfile>,
    sent_count: u64,
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            resume: None,
            profile: None,
            sent_count: 0,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    pub fn attach_resume(&mut self, resume: ResumeFile) {
        info!("Resume attached: {} ({:.2} MB)", resume.file_name(), resume.size_mb());
        self.resume = Some(resume);
    }

    pub fn detach_resume(&mut self) -> Option<ResumeFile> {
        self.resume.take()
    }

    /// Profile sent along with every email.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Option<UserProfile>) {
        self.profile = profile;
    }

    /// Fetches the sender profile. Emails can go out without one, so a failed
    /// lookup is logged and leaves the session with no profile.
    pub async fn load_profile(&mut self) -> Option<&UserProfile> {
        self.profile = match self.api.get_profile().await {
            Ok(response) => response.into_data(),
            Err(e) => {
                warn!("Could not load profile, sending without it: {e}");
                None
            }
        };
        self.profile.as_ref()
    }

    pub async fn load_contacts(&mut self) -> Result<ApiResponse<Vec<Contact>>, ApiError> {
        let response = self.api.get_all_contacts().await?;
        match response.data.as_ref().filter(|_| response.success) {
            Some(contacts) => {
                info!("Loaded {} contacts", contacts.len());
                self.contacts = contacts.clone();
            }
            None => warn!("Could not load contacts: {}", response.failure_message()),
        }
        Ok(response)
    }

    pub async fn save_contact(
        &mut self,
        draft: &ContactDraft,
    ) -> Result<ApiResponse<Contact>, ApiError> {
        let response = self.api.add_contact(draft).await?;
        if let Some(contact) = response.data.as_ref().filter(|_| response.success) {
            self.contacts.insert(0, contact.clone());
        }
        Ok(response)
    }

    pub async fn edit_contact(
        &mut self,
        id: &ContactId,
        draft: &ContactDraft,
    ) -> Result<ApiResponse<Contact>, ApiError> {
        let response = self.api.update_contact(id, draft).await?;
        if let Some(updated) = response.data.as_ref().filter(|_| response.success) {
            if let Some(slot) = self.contacts.iter_mut().find(|c| &c.id == id) {
                *slot = updated.clone();
            }
        }
        Ok(response)
    }

    pub async fn remove_contact(&mut self, id: &ContactId) -> Result<ApiResponse<()>, ApiError> {
        let response = self.api.delete_contact(id).await?;
        if response.success {
            self.contacts.retain(|c| &c.id != id);
        }
        Ok(response)
    }

    pub async fn send_to_individual(
        &mut self,
        id: &ContactId,
    ) -> Result<ApiResponse<BulkSendResult>, ApiError> {
        let resume = self.require_resume()?;
        let contact = self
            .contacts
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| ApiError::Validation(format!("No contact with id {id}")))?;

        let response = self
            .api
            .send_to_individual(contact, resume, self.profile.as_ref())
            .await?;
        if response.success {
            self.sent_count += 1;
            info!(
                "Resume sent to {} at {}",
                contact.hr_name, contact.company_name
            );
        }
        Ok(response)
    }

    pub async fn bulk_send(&mut self) -> Result<ApiResponse<BulkSendResult>, ApiError> {
        let resume = self.require_resume()?;
        if self.contacts.is_empty() {
            return Err(ApiError::Validation(
                "Add at least one HR contact first".into(),
            ));
        }

        let response = self
            .api
            .send_bulk_emails(&self.contacts, resume, self.profile.as_ref())
            .await?;
        if response.success {
            let sent = response
                .data
                .as_ref()
                .and_then(|d| d.success_count)
                .map(u64::from)
                .unwrap_or(self.contacts.len() as u64);
            self.sent_count += sent;
        }
        Ok(response)
    }

    fn require_resume(&self) -> Result<&ResumeFile, ApiError> {
        self.resume
            .as_ref()
            .ok_or_else(|| ApiError::Validation("Please upload resume first".into()))
    }
}
