//! SoloFocus session REST client.
//!
//! `POST /timer/start` and `POST /timer/end`, both form-encoded.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{SessionId, TimerMode};


/// Backend calls made by the timer.
pub trait SessionApi: Send {
    /// Open a session and return the server-issued identifier.
    fn start_session(&self, mode: TimerMode) -> Result<SessionId, SessionApiError>;

    /// Close a session with its length in whole minutes.
    fn end_session(&self, session_id: &SessionId, duration_minutes: u32) -> Result<(), SessionApiError>;
}


/// Errors that can occur when talking to the session API.
#[derive(Error, Debug)]
pub enum SessionApiError {
    #[error("Session server unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },
}


#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartResponse {
    session_id: SessionId,
}


/// Blocking HTTP implementation of [`SessionApi`].
pub struct HttpSessionApi {
    client: Client,
    base_url: String,
}


impl HttpSessionApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SessionApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<reqwest::blocking::Response, SessionApiError> {
        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                SessionApiError::Timeout
            } else if e.is_connect() {
                SessionApiError::Unavailable
            } else {
                SessionApiError::Request(e)
            }
        })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            Err(SessionApiError::ApiError { status, message })
        }
    }
}


impl SessionApi for HttpSessionApi {
    fn start_session(&self, mode: TimerMode) -> Result<SessionId, SessionApiError> {
        let request = self
            .client
            .post(self.endpoint("/timer/start"))
            .form(&[("sessionType", mode.wire_name())]);

        let body: StartResponse = self.send(request)?.json()?;
        tracing::info!(session = %body.session_id, "Session started on server");
        Ok(body.session_id)
    }

    fn end_session(&self, session_id: &SessionId, duration_minutes: u32) -> Result<(), SessionApiError> {
        let minutes = duration_minutes.to_string();
        let request = self.client.post(self.endpoint("/timer/end")).form(&[
            ("sessionId", session_id.as_str()),
            ("durationMinutes", minutes.as_str()),
        ]);

        self.send(request)?;
        tracing::info!(session = %session_id, duration_minutes, "Session ended on server");
        Ok(())
    }
}
