use reqwest::Method;
use tracing::info;

use super::{paths, ApiClient, ApiRequest, Operation, RequestBody};
use crate::coordinator::RequestKey;
use crate::errors::ApiError;
use crate::models::{ApiResponse, Contact, ContactDraft, ContactId};

impl ApiClient {
    /// GET /getAllContacts
    pub async fn get_all_contacts(&self) -> Result<ApiResponse<Vec<Contact>>, ApiError> {
        self.read(
            RequestKey::path(paths::CONTACTS),
            ApiRequest::get(paths::CONTACTS),
        )
        .await
    }

    /// POST /addContact
    pub async fn add_contact(&self, draft: &ContactDraft) -> Result<ApiResponse<Contact>, ApiError> {
        let request = ApiRequest::new(
            Method::POST,
            paths::ADD_CONTACT,
            RequestBody::Json(serde_json::to_value(draft)?),
        );
        let response: ApiResponse<Contact> =
            self.write(Operation::AddContact, request).await?;
        if let Some(contact) = response.data.as_ref().filter(|_| response.success) {
            info!("Contact saved: {} ({})", contact.id, contact.company_name);
        }
        Ok(response)
    }

    /// PUT /updateContact/:id
    pub async fn update_contact(
        &self,
        id: &ContactId,
        draft: &ContactDraft,
    ) -> Result<ApiResponse<Contact>, ApiError> {
        let request = ApiRequest::new(
            Method::PUT,
            format!("{}/{id}", paths::UPDATE_CONTACT),
            RequestBody::Json(serde_json::to_value(draft)?),
        );
        let response: ApiResponse<Contact> =
            self.write(Operation::UpdateContact, request).await?;
        if response.success {
            info!("Contact updated: {id}");
        }
        Ok(response)
    }

    /// DELETE /deleteContact/:id
    pub async fn delete_contact(&self, id: &ContactId) -> Result<ApiResponse<()>, ApiError> {
        let request = ApiRequest::new(
            Method::DELETE,
            format!("{}/{id}", paths::DELETE_CONTACT),
            RequestBody::Empty,
        );
        let response: ApiResponse<()> =
            self.write(Operation::DeleteContact, request).await?;
        if response.success {
            info!("Contact deleted: {id}");
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::api_client::testing::{client_with, MockTransport, SHORT};

    fn contact_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "hr_name": name,
            "email": format!("{}@acme.io", name.to_lowercase()),
            "company_name": "Acme",
            "job_position": "Engineer",
            "required_skills": ["Rust"]
        })
    }

    fn backend() -> MockTransport {
        MockTransport::new(|request| {
            Ok(match (request.method.as_str(), request.path.as_str()) {
                ("GET", "/getAllContacts") => {
                    json!({ "success": true, "data": [contact_json(1, "Priya")] })
                }
                ("POST", "/addContact") => {
                    json!({ "success": true, "data": contact_json(2, "Sam") })
                }
                ("PUT", _) => json!({ "success": true, "data": contact_json(1, "Priya K") }),
                ("DELETE", _) => json!({ "success": true }),
                _ => json!({ "success": false, "error": "unknown route" }),
            })
        })
    }

    fn draft() -> ContactDraft {
        ContactDraft {
            hr_name: "Sam".into(),
            email: "sam@acme.io".into(),
            company_name: "Acme".into(),
            job_position: "Engineer".into(),
            required_skills: vec!["Rust".into()],
        }
    }

    #[tokio::test]
    async fn test_list_twice_within_window_hits_network_once() {
        let transport = Arc::new(backend());
        let (client, clock) = client_with(Arc::clone(&transport));

        let first = client.get_all_contacts().await.unwrap();
        clock.advance(SHORT);
        let second = client.get_all_contacts().await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(first, second);
        assert_eq!(first.data.unwrap()[0].hr_name, "Priya");
    }

    #[tokio::test]
    async fn test_add_contact_invalidates_contact_list() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));

        client.get_all_contacts().await.unwrap();
        let added = client.add_contact(&draft()).await.unwrap();
        assert!(added.success);
        client.get_all_contacts().await.unwrap();

        let gets = transport
            .requests()
            .iter()
            .filter(|r| r.path == paths::CONTACTS)
            .count();
        assert_eq!(gets, 2);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_cache() {
        let transport = Arc::new(MockTransport::new(|request| {
            Ok(match request.method.as_str() {
                "GET" => json!({ "success": true, "data": [] }),
                _ => json!({ "success": false, "error": "duplicate email" }),
            })
        }));
        let (client, _clock) = client_with(Arc::clone(&transport));

        client.get_all_contacts().await.unwrap();
        let added = client.add_contact(&draft()).await.unwrap();
        assert!(!added.success);
        client.get_all_contacts().await.unwrap();

        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_back_to_back_add_is_rejected() {
        let (transport, release) = backend().gated();
        let transport = Arc::new(transport);
        let (client, _clock) = client_with(Arc::clone(&transport));
        let draft = draft();

        let (first, second, _) = tokio::join!(
            client.add_contact(&draft),
            client.add_contact(&draft),
            async {
                tokio::task::yield_now().await;
                let _ = release.send(());
            }
        );

        assert!(first.unwrap().success);
        let second = second.unwrap();
        assert!(!second.success);
        assert_eq!(second.message.as_deref(), Some("Already adding"));
        assert_eq!(transport.calls(), 1);
        assert!(!client.coordinator().is_busy(Operation::AddContact.flag()));
    }

    #[tokio::test]
    async fn test_update_and_delete_use_id_in_path() {
        let transport = Arc::new(backend());
        let (client, _clock) = client_with(Arc::clone(&transport));
        let id = ContactId::Number(1);

        let updated = client.update_contact(&id, &draft()).await.unwrap();
        assert_eq!(updated.data.unwrap().hr_name, "Priya K");
        assert!(client.delete_contact(&id).await.unwrap().success);

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/updateContact/1");
        assert_eq!(requests[1].path, "/deleteContact/1");
        assert_eq!(requests[1].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_transport_error_clears_flag() {
        let transport = Arc::new(MockTransport::new(|_| {
            Err(ApiError::Http {
                status: 503,
                body: "maintenance".into(),
            })
        }));
        let (client, _clock) = client_with(Arc::clone(&transport));

        let err = client.delete_contact(&ContactId::Number(4)).await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 503, .. }));
        assert!(!client.coordinator().is_busy(Operation::DeleteContact.flag()));

        client.delete_contact(&ContactId::Number(4)).await.unwrap_err();
        assert_eq!(transport.calls(), 2);
    }
}
