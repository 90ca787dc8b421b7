//! Profile read and update

use crate::error::Result;
use crate::model::dtos::ProfileUpdate;
use crate::model::structs::Profile;
use crate::request::{CallOptions, Gateway, Method, Transport};
use crate::session::Session;

pub const PROFILE_PATH: &str = "/api/profile/";

pub async fn get_profile<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
) -> Result<Profile> {
    let value = gateway
        .authorized_call(session, PROFILE_PATH, CallOptions::get())
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn update_profile<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    update: &ProfileUpdate,
) -> Result<Profile> {
    let value = gateway
        .authorized_call(
            session,
            PROFILE_PATH,
            CallOptions::json(Method::Put, update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::structs::Role;
    use crate::request::testing::{ok, MockTransport};
    use crate::request::RequestBody;
    use crate::session::{MemorySessionStore, SessionStore, ACCESS_KEY};

    fn session() -> Session {
        let store = Arc::new(MemorySessionStore::new());
        store.set(ACCESS_KEY, "A1");
        Session::new(store)
    }

    #[tokio::test]
    async fn teacher_profile_decodes_with_student_fields_absent() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| {
                ok(r#"{
                    "email": "t@example.com",
                    "role": "teacher",
                    "full_name": "T. Verma",
                    "organization": "Prep Institute",
                    "experience_years": 8
                }"#)
            }),
        );

        let profile = get_profile(&gateway, &session()).await.unwrap();
        assert_eq!(profile.role, Role::Teacher);
        assert_eq!(profile.organization.as_deref(), Some("Prep Institute"));
        assert_eq!(profile.age, None);
        assert_eq!(profile.school, None);
    }

    #[tokio::test]
    async fn update_sends_only_present_fields() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| ok(r#"{"email": "t@example.com", "role": "teacher"}"#)),
        );

        let update = ProfileUpdate {
            full_name: Some("T. Verma".to_string()),
            ..Default::default()
        };
        update_profile(&gateway, &session(), &update).await.unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(requests[0].method, Method::Put);
        match &requests[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body.as_object().unwrap().len(), 1);
                assert_eq!(body["full_name"], "T. Verma");
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }
}
