//! Registration, login and logout

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::model::dtos::{LoginRequest, StudentRegistration, TeacherRegistration};
use crate::model::structs::{LoginResponse, Role, UserInfo};
use crate::request::{CallOptions, Gateway, Method, Transport};
use crate::session::Session;

pub const REGISTER_PATH: &str = "/api/register/";
pub const LOGIN_PATH: &str = "/api/login/";

// The backend expects the role tag inside the registration body; it is
// injected here so the caller-facing DTOs stay role-specific.
#[derive(Serialize)]
struct RoleTagged<'a, P: Serialize> {
    role: Role,
    #[serde(flatten)]
    payload: &'a P,
}

pub async fn register_student<T: Transport>(
    gateway: &Gateway<T>,
    registration: &StudentRegistration,
) -> Result<Value> {
    let body = RoleTagged {
        role: Role::Student,
        payload: registration,
    };
    gateway
        .call(REGISTER_PATH, CallOptions::json(Method::Post, &body)?, None)
        .await
}

pub async fn register_teacher<T: Transport>(
    gateway: &Gateway<T>,
    registration: &TeacherRegistration,
) -> Result<Value> {
    let body = RoleTagged {
        role: Role::Teacher,
        payload: registration,
    };
    gateway
        .call(REGISTER_PATH, CallOptions::json(Method::Post, &body)?, None)
        .await
}

/// Exchanges credentials for a token pair and stores it in the session
/// together with the cached identity.
pub async fn login<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    email: &str,
    password: &str,
) -> Result<UserInfo> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let value = gateway
        .call(LOGIN_PATH, CallOptions::json(Method::Post, &request)?, None)
        .await?;
    let response: LoginResponse = serde_json::from_value(value)?;
    session.apply_login(&response);
    debug!(role = response.user.role.as_str(), "login succeeded");
    Ok(response.user)
}

/// Erases all session state. Calling it twice is the same as calling it once.
pub fn logout(session: &Session) {
    session.teardown();
}
