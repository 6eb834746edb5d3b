//! Backend session API client.

mod dispatcher;
mod session_api;

pub use dispatcher::{SessionDispatcher, SessionEvent, SessionRequest};
pub use session_api::{HttpSessionApi, SessionApi, SessionApiError};
