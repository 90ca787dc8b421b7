//! Reqwest-backed transport implementation
//!
//! Maps the transport-agnostic request types onto reqwest, including the
//! multipart encoding used for document uploads.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart;
use reqwest::Client;

use crate::error::{ErrorKind, Result};

use super::{ApiRequest, FormValue, HttpClient, Method, RawResponse, RequestBody, Transport};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl HttpClient for ReqwestTransport {
    async fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ErrorKind::ParseError(e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ErrorKind::ParseError(e.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = self.client.request(method, &request.url).headers(headers);

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(parts) => {
                let mut form = multipart::Form::new();
                for part in parts {
                    form = match part.value {
                        FormValue::Text(text) => form.text(part.name, text),
                        FormValue::File { file_name, data } => form.part(
                            part.name,
                            multipart::Part::bytes(data).file_name(file_name),
                        ),
                    };
                }
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status();

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: response.text().await?,
        })
    }
}
