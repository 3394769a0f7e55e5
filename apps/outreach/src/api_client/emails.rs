use reqwest::Method;
use tracing::{info, warn};

use super::{paths, ApiClient, ApiRequest, Operation, RequestBody};
use crate::coordinator::RequestKey;
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, BulkSendForm, BulkSendResult, Contact, EmailLog, EmailLogQuery, EmailStats,
    OutgoingContact, ResumeFile, UserProfile,
};

impl ApiClient {
    /// POST /emails/bulk-send. The same resume goes to every contact.
    pub async fn send_bulk_emails(
        &self,
        contacts: &[Contact],
        resume: &ResumeFile,
        user_profile: Option<&UserProfile>,
    ) -> Result<ApiResponse<BulkSendResult>, ApiError> {
        if contacts.is_empty() {
            return Err(ApiError::Validation(
                "No contacts provided for bulk email sending".into(),
            ));
        }

        let form = BulkSendForm {
            resume: resume.clone(),
            contacts: contacts.iter().map(OutgoingContact::from).collect(),
            user_profile: user_profile.cloned(),
        };
        info!(
            "Bulk send: {} contacts, resume {} ({:.2} MB)",
            form.contacts.len(),
            resume.file_name(),
            resume.size_mb()
        );

        let request = ApiRequest::new(
            Method::POST,
            paths::BULK_SEND,
            RequestBody::BulkSend(form),
        );
        let response: ApiResponse<BulkSendResult> =
            self.write(Operation::SendBulkEmails, request).await?;
        if response.success {
            let sent = response
                .data
                .as_ref()
                .and_then(|d| d.success_count)
                .unwrap_or(contacts.len() as u32);
            info!("Bulk send accepted: {sent} emails");
        } else {
            warn!("Bulk send rejected: {}", response.failure_message());
        }
        Ok(response)
    }

    /// Sends the resume to a single contact through the bulk endpoint.
    pub async fn send_to_individual(
        &self,
        contact: &Contact,
        resume: &ResumeFile,
        user_profile: Option<&UserProfile>,
    ) -> Result<ApiResponse<BulkSendResult>, ApiError> {
        self.send_bulk_emails(std::slice::from_ref(contact), resume, user_profile)
            .await
    }

    /// GET /emails/logs
    pub async fn get_email_logs(
        &self,
        query: &EmailLogQuery,
    ) -> Result<ApiResponse<Vec<EmailLog>>, ApiError> {
        let key = RequestKey::with_options(paths::EMAIL_LOGS, query)?;
        let request = ApiRequest::get(paths::EMAIL_LOGS).with_query(query.to_pairs());
        self.read(key, request).await
    }

    /// GET /emails/stats
    pub async fn get_email_stats(&self) -> Result<ApiResponse<EmailStats>, ApiError> {
        self.read(
            RequestKey::path(paths::EMAIL_STATS),
            ApiRequest::get(paths::EMAIL_STATS),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api_client::testing::{client_with, MockTransport};
    use crate::models::ContactId;

    fn contact(id: i64) -> Contact {
        Contact {
            id: ContactId::Number(id),
            hr_name: String::new(),
            email: format!("hr{id}@acme.io"),
            company_name: "Acme".into(),
            job_position: String::new(),
            required_skills: vec![],
            created_at: None,
        }
    }

    fn resume() -> ResumeFile {
        ResumeFile::new("cv.pdf", "application/pdf", b"%PDF-1.7".to_vec()).unwrap()
    }

    fn backend() -> MockTransport {
        MockTransport::new(|request| {
            Ok(match request.path.as_str() {
                "/emails/bulk-send" => json!({ "success": true, "data": { "successCount": 2 } }),
                "/emails/stats" => json!({ "success": true, "data": { "total_sent": 12 } }),
                _ => json!({ "success": true, "data": [] }),
            })
        })
    }

    #[tokio::test]
    async fn test_empty_contact_list_is_validation_error() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));

        let err = client.send_bulk_emails(&[], &resume(), None).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_bulk_send_cleans_contacts() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));

        let response = client
            .send_bulk_emails(&[contact(1), contact(2)], &resume(), None)
            .await
            .unwrap();
        assert_eq!(response.data.unwrap().success_count, Some(2));

        let requests = transport.requests();
        let RequestBody::BulkSend(form) = &requests[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.contacts.len(), 2);
        assert_eq!(form.contacts[0].hr_name, "HR");
        assert_eq!(form.contacts[0].job_position, "Position");
        assert_eq!(form.resume.file_name(), "cv.pdf");
    }

    #[tokio::test]
    async fn test_bulk_send_invalidates_stats_and_logs() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));

        client.get_email_stats().await.unwrap();
        client.get_email_logs(&EmailLogQuery::default()).await.unwrap();
        client.send_to_individual(&contact(1), &resume(), None).await.unwrap();
        client.get_email_stats().await.unwrap();
        client.get_email_logs(&EmailLogQuery::default()).await.unwrap();

        assert_eq!(transport.calls(), 5);
    }

    #[tokio::test]
    async fn test_logs_with_different_options_are_cached_separately() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));
        let first_page = EmailLogQuery {
            limit: Some(20),
            page: Some(1),
        };
        let second_page = EmailLogQuery {
            limit: Some(20),
            page: Some(2),
        };

        client.get_email_logs(&first_page).await.unwrap();
        client.get_email_logs(&second_page).await.unwrap();
        client.get_email_logs(&first_page).await.unwrap();

        assert_eq!(transport.calls(), 2);
        assert_eq!(
            transport.requests()[1].query,
            vec![
                ("limit".to_string(), "20".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_second_bulk_send_while_sending_is_rejected() {
        let (transport, release) = backend().gated();
        let transport = Arc::new(transport);
        let (client, _clock) = client_with(Arc::clone(&transport));
        let contacts = [contact(1)];
        let resume = resume();

        let (first, second, _) = tokio::join!(
            client.send_bulk_emails(&contacts, &resume, None),
            client.send_bulk_emails(&contacts, &resume, None),
            async {
                let _ = release.send(());
            }
        );

        assert!(first.unwrap().success);
        assert_eq!(
            second.unwrap().message.as_deref(),
            Some("Already sending bulk emails")
        );
        assert_eq!(transport.calls(), 1);
    }
}
