//! Fire-and-forget delivery of session calls on a worker thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::models::{SessionId, TimerMode};

use super::session_api::SessionApi;


/// Call queued for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    Start { run: u64, mode: TimerMode },
    End { session_id: SessionId, duration_minutes: u32 },
}


/// Outcome reported back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { run: u64, session_id: SessionId },
    StartFailed { run: u64 },
    Ended { duration_minutes: u32 },
    EndFailed,
}


/// Owns the worker thread; dropping it closes the queue and joins the worker.
pub struct SessionDispatcher {
    requests: Option<Sender<SessionRequest>>,
    events: Receiver<SessionEvent>,
    worker: Option<JoinHandle<()>>,
}


impl SessionDispatcher {
    pub fn spawn<A: SessionApi + 'static>(api: A) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<SessionRequest>();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            for request in request_rx {
                let event = handle(&api, request);
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            events: event_rx,
            worker: Some(worker),
        }
    }

    /// Queue a call without waiting for it.
    pub fn submit(&self, request: SessionRequest) {
        let Some(requests) = &self.requests else { return };
        if requests.send(request).is_err() {
            tracing::error!("Session worker is gone; dropping request");
        }
    }

    /// Outcomes that have arrived since the last call.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.events.try_iter().collect()
    }

    /// Block until the next outcome arrives.
    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<SessionEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}


impl Drop for SessionDispatcher {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}


fn handle<A: SessionApi>(api: &A, request: SessionRequest) -> SessionEvent {
    match request {
        SessionRequest::Start { run, mode } => match api.start_session(mode) {
            Ok(session_id) => SessionEvent::Started { run, session_id },
            Err(e) => {
                tracing::error!(error = %e, "Error starting session");
                SessionEvent::StartFailed { run }
            }
        },
        SessionRequest::End { session_id, duration_minutes } => {
            match api.end_session(&session_id, duration_minutes) {
                Ok(()) => SessionEvent::Ended { duration_minutes },
                Err(e) => {
                    tracing::error!(error = %e, session = %session_id, "Error ending session");
                    SessionEvent::EndFailed
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SessionApiError;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct FakeApi {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl SessionApi for FakeApi {
        fn start_session(&self, mode: TimerMode) -> Result<SessionId, SessionApiError> {
            self.calls.lock().unwrap().push(format!("start {mode}"));
            if self.fail {
                Err(SessionApiError::Unavailable)
            } else {
                Ok(SessionId::new("7"))
            }
        }

        fn end_session(&self, session_id: &SessionId, duration_minutes: u32) -> Result<(), SessionApiError> {
            self.calls.lock().unwrap().push(format!("end {session_id} {duration_minutes}"));
            if self.fail {
                Err(SessionApiError::Timeout)
            } else {
                Ok(())
            }
        }
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_requests_come_back_as_events() {
        let api = FakeApi::default();
        let calls = api.calls.clone();
        let dispatcher = SessionDispatcher::spawn(api);

        dispatcher.submit(SessionRequest::Start { run: 3, mode: TimerMode::Focus });
        assert_eq!(
            dispatcher.recv_timeout(WAIT),
            Some(SessionEvent::Started { run: 3, session_id: SessionId::new("7") })
        );

        dispatcher.submit(SessionRequest::End { session_id: SessionId::new("7"), duration_minutes: 25 });
        assert_eq!(dispatcher.recv_timeout(WAIT), Some(SessionEvent::Ended { duration_minutes: 25 }));

        drop(dispatcher);
        assert_eq!(*calls.lock().unwrap(), vec!["start pomodoro", "end 7 25"]);
    }

    #[test]
    fn test_failures_are_reported_not_raised() {
        let dispatcher = SessionDispatcher::spawn(FakeApi { fail: true, ..Default::default() });

        dispatcher.submit(SessionRequest::Start { run: 1, mode: TimerMode::Focus });
        dispatcher.submit(SessionRequest::End { session_id: SessionId::new("1"), duration_minutes: 5 });

        assert_eq!(dispatcher.recv_timeout(WAIT), Some(SessionEvent::StartFailed { run: 1 }));
        assert_eq!(dispatcher.recv_timeout(WAIT), Some(SessionEvent::EndFailed));
        assert!(dispatcher.drain().is_empty());
    }
}
