//! Background worker for the curve store API.
//!
//! A single worker thread owns the HTTP client and processes requests in
//! submission order; the UI never blocks. Responses surface as
//! [`CurveEvent`]s drained with `poll_events()` each frame. Requests for one
//! curve are additionally serialized at the edit-session level — the worker
//! itself just guarantees ordered delivery.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use luxcurve_core::{Curve, RequestId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::protocol::{CurveEvent, CurveOutcome, CurveRequest};

/// Request timeout for store round trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the curve store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: Option<u16>,
    pub ssl: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: Some(8000),
            ssl: false,
        }
    }
}

impl ApiConfig {
    /// The API root, always ending in `/api/`.
    pub fn base_url(&self) -> Result<Url, ApiError> {
        let scheme = if self.ssl { "https" } else { "http" };
        let authority = match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        };
        Ok(Url::parse(&format!("{scheme}://{authority}/api/"))?)
    }
}

/// Failures of a store round trip.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server address: {0}")]
    Config(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Error body shape used by the store for refusals.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

struct Command {
    id: RequestId,
    request: CurveRequest,
}

/// Non-blocking client for the curve store.
pub struct ApiClient {
    cmd_tx: Option<Sender<Command>>,
    event_rx: Receiver<CurveEvent>,
    events: Vec<CurveEvent>,
    _thread: Option<JoinHandle<()>>,
}

impl ApiClient {
    /// Spawn the worker thread against the configured store.
    pub fn spawn(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = config.base_url()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let (cmd_tx, cmd_rx) = channel::<Command>();
        let (event_tx, event_rx) = channel::<CurveEvent>();

        let thread = thread::spawn(move || {
            log::info!("api worker started for {base}");
            while let Ok(cmd) = cmd_rx.recv() {
                let curve_id = cmd.request.curve_id();
                let outcome = match perform(&http, &base, &cmd.request) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        log::warn!("{:?} failed: {err}", cmd.request);
                        CurveOutcome::Failed(err)
                    }
                };
                let event = CurveEvent { request: cmd.id, curve_id, outcome };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
            log::info!("api worker exiting");
        });

        Ok(Self {
            cmd_tx: Some(cmd_tx),
            event_rx,
            events: Vec::new(),
            _thread: Some(thread),
        })
    }

    /// Queue a request; the matching event carries the returned token.
    pub fn submit(&mut self, request: CurveRequest) -> RequestId {
        let id = Uuid::new_v4();
        let curve_id = request.curve_id();
        if let Some(ref tx) = self.cmd_tx {
            if tx.send(Command { id, request }).is_err() {
                log::error!("api worker is gone, request dropped");
                self.events.push(CurveEvent {
                    request: id,
                    curve_id,
                    outcome: CurveOutcome::Failed(ApiError::Decode("worker unavailable".into())),
                });
            }
        }
        id
    }

    /// Drain resolved requests (non-blocking).
    pub fn poll_events(&mut self) -> Vec<CurveEvent> {
        while let Ok(event) = self.event_rx.try_recv() {
            self.events.push(event);
        }
        std::mem::take(&mut self.events)
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        // Closing the command channel lets the worker run down.
        self.cmd_tx = None;
    }
}

/// Execute one request against the store.
fn perform(
    http: &reqwest::blocking::Client,
    base: &Url,
    request: &CurveRequest,
) -> Result<CurveOutcome, ApiError> {
    let join = |path: &str| -> Result<Url, ApiError> { Ok(base.join(path)?) };

    match request {
        CurveRequest::FetchAll => {
            let response = check_status(http.get(join("curves/")?).send()?)?;
            let curves: Vec<Curve> = response
                .json()
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            Ok(CurveOutcome::Curves(curves))
        }
        CurveRequest::Fetch { id } => {
            let response = http.get(join(&format!("curves/{id}"))?).send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
        CurveRequest::Create { body } => {
            let response = http.post(join("curves/")?).json(body).send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
        CurveRequest::UpdateMeta { id, body } => {
            let response = http.put(join(&format!("curves/{id}"))?).json(body).send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
        CurveRequest::Delete { id } => {
            check_status(http.delete(join(&format!("curves/{id}"))?).send()?)?;
            Ok(CurveOutcome::Deleted { id: *id })
        }
        CurveRequest::ChangePoint { id, index, body } => {
            let response = http
                .put(join(&format!("curves/{id}/{index}"))?)
                .json(body)
                .send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
        CurveRequest::InsertPoint { id, index, body } => {
            let response = http
                .post(join(&format!("curves/{id}/{index}"))?)
                .json(body)
                .send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
        CurveRequest::DeletePoint { id, index } => {
            let response = http.delete(join(&format!("curves/{id}/{index}"))?).send()?;
            Ok(CurveOutcome::Curve(read_curve(response)?))
        }
    }
}

/// Parse a successful response into a curve, sanity-checking its shape.
fn read_curve(response: reqwest::blocking::Response) -> Result<Curve, ApiError> {
    let response = check_status(response)?;
    let curve: Curve = response
        .json()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if let Err(reason) = curve.check_invariants() {
        log::error!("store returned malformed curve {}: {reason}", curve.id);
    }
    Ok(curve)
}

/// Turn non-2xx responses into `ApiError::Status` with the store's detail.
fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok().map(|b| b.detail))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request refused").to_string());
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_plain() {
        let config = ApiConfig {
            host: "bridge.local".into(),
            port: Some(8000),
            ssl: false,
        };
        assert_eq!(config.base_url().unwrap().as_str(), "http://bridge.local:8000/api/");
    }

    #[test]
    fn test_base_url_ssl_without_port() {
        let config = ApiConfig {
            host: "lights.example.org".into(),
            port: None,
            ssl: true,
        };
        assert_eq!(config.base_url().unwrap().as_str(), "https://lights.example.org/api/");
    }

    #[test]
    fn test_base_url_rejects_garbage_host() {
        let config = ApiConfig {
            host: "not a host".into(),
            port: None,
            ssl: false,
        };
        assert!(config.base_url().is_err());
    }

    #[test]
    fn test_endpoint_paths() {
        let base = ApiConfig::default().base_url().unwrap();
        assert_eq!(base.join("curves/").unwrap().path(), "/api/curves/");
        assert_eq!(base.join("curves/3").unwrap().path(), "/api/curves/3");
        assert_eq!(base.join("curves/3/1").unwrap().path(), "/api/curves/3/1");
    }

    #[test]
    fn test_error_body_parses_store_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "First Point is not deletable"}"#).unwrap();
        assert_eq!(body.detail, "First Point is not deletable");
    }
}
