//! Authenticated request gateway
//!
//! Single choke point for backend communication: attaches the bearer
//! credential, normalizes success/error outcomes, and recovers once from an
//! expired-credential failure via the refresh exchange. The refresh path is
//! guarded by the session's single-flight gate so concurrent expired calls
//! perform one exchange between them.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::model::structs::RefreshResponse;
use crate::session::Session;

use super::{
    ApiRequest, CallOptions, HttpClient, Method, RawResponse, ReqwestTransport, RequestBody,
    Transport,
};

pub const REFRESH_PATH: &str = "/api/token/refresh/";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const BASE_URL_ENV: &str = "TRAINING_API_BASE";

pub struct Gateway<T: Transport> {
    base_url: String,
    transport: T,
}

impl Gateway<ReqwestTransport> {
    /// Builds a reqwest-backed gateway against `TRAINING_API_BASE`, falling
    /// back to the local development server.
    pub async fn from_env() -> Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(base_url, ReqwestTransport::new().await?))
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues one request against `path` (relative, `/api/...`).
    ///
    /// A bearer header is attached when a credential is present. The JSON
    /// content type is supplied by default and caller headers win on
    /// conflict; multipart bodies bypass the default and bring their own
    /// encoding. 2xx responses resolve to the parsed JSON body (null when
    /// empty); anything else becomes a typed `ApiError`.
    pub async fn call(
        &self,
        path: &str,
        options: CallOptions,
        credential: Option<&str>,
    ) -> Result<Value> {
        let CallOptions {
            method,
            body,
            headers: extra,
        } = options;

        let mut headers: Vec<(String, String)> = Vec::new();
        if !matches!(body, RequestBody::Multipart(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = credential {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        for (name, value) in extra {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        };

        let response = self.transport.execute(request).await?;
        normalize(response)
    }

    /// The recovering variant: reads credentials from the session, issues the
    /// call, and on an expired-credential failure performs at most one
    /// refresh exchange before retrying the original call once.
    ///
    /// A failed refresh tears the session down and propagates the refresh
    /// error; with no refresh credential the original failure propagates
    /// unchanged.
    pub async fn authorized_call(
        &self,
        session: &Session,
        path: &str,
        options: CallOptions,
    ) -> Result<Value> {
        let access = session.access();
        let err = match self.call(path, options.clone(), access.as_deref()).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        if !err.is_auth_expired() {
            return Err(err);
        }
        let Some(refresh) = session.refresh_token() else {
            return Err(err);
        };

        let retry_token = {
            let _gate = session.refresh_gate().await;
            match session.access() {
                // A concurrent caller already refreshed while we were failing;
                // reuse its credential instead of spending another exchange.
                Some(current) if Some(current.as_str()) != access.as_deref() => current,
                _ => self.exchange_refresh(session, &refresh).await?,
            }
        };

        debug!(path, "retrying with refreshed credential");
        self.call(path, options, Some(&retry_token)).await
    }

    async fn exchange_refresh(&self, session: &Session, refresh: &str) -> Result<String> {
        debug!("access credential expired, attempting refresh");
        let body = serde_json::json!({ "refresh": refresh });
        let outcome: Result<String> = async {
            let value = self
                .call(REFRESH_PATH, CallOptions::json(Method::Post, &body)?, None)
                .await?;
            let response: RefreshResponse = serde_json::from_value(value)?;
            Ok(response.access)
        }
        .await;

        match outcome {
            Ok(access) => {
                session.apply_refresh(&access);
                Ok(access)
            }
            Err(e) => {
                warn!("refresh exchange failed, tearing down session");
                session.teardown();
                Err(e)
            }
        }
    }
}

fn normalize(response: RawResponse) -> Result<Value> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(&response.body)?);
    }

    let body: Option<Value> = serde_json::from_str(&response.body).ok();
    Err(ApiError::from_response(response.status, &response.status_text, body.as_ref()).into())
}
