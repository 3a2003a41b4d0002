//! W3C Nu HTML Checker backend.
//!
//! Posts the document as `text/html` to a Nu endpoint with `out=json` and
//! maps the returned messages:
//!
//! | Nu `type`             | Nu `subType` | result                          |
//! |-----------------------|--------------|---------------------------------|
//! | `error`               | any          | `Severity::Error`               |
//! | `info`                | `warning`    | `Severity::Warning`             |
//! | `info`                | other        | `Severity::Info`                |
//! | `non-document-error`  | any          | `ValidatorError::Rejected`      |

use serde::Deserialize;
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{ConformanceMessage, ConformanceValidator, Severity, ValidatorError};
use crate::version::user_agent;

const CONNECT_TIMEOUT_MS: u64 = 10000;
const MAX_RETRIES: u32 = 2;
const RETRY_DELAY_MS: u64 = 1000;

/// Public W3C instance
pub const DEFAULT_NU_URL: &str = "https://validator.w3.org/nu/?out=json";

/// Parsed validator endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub tls: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Endpoint {
    /// Split an `http(s)://host[:port]/path` URL. `out=json` is appended to
    /// the query when missing.
    pub fn parse(url: &str) -> Result<Self, ValidatorError> {
        let invalid = || ValidatorError::InvalidUrl {
            url: url.to_string(),
        };

        let (tls, rest) = if let Some(rest) = url.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = url.strip_prefix("http://") {
            (false, rest)
        } else {
            return Err(invalid());
        };

        let (authority, path) = match rest.find(['/', '?']) {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse::<u16>().map_err(|_| invalid())?),
            None => (authority, if tls { 443 } else { 80 }),
        };

        if host.is_empty() {
            return Err(invalid());
        }

        let mut path = if path.starts_with('?') {
            format!("/{}", path)
        } else {
            path.to_string()
        };
        if !path.contains("out=json") {
            path.push(if path.contains('?') { '&' } else { '?' });
            path.push_str("out=json");
        }

        Ok(Endpoint {
            tls,
            host: host.to_string(),
            port,
            path,
        })
    }

    /// Full request URL
    pub fn url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

/// Nu HTML Checker client
pub struct NuValidator {
    endpoint: Endpoint,
    agent: ureq::Agent,
}

impl NuValidator {
    /// Create a validator for `url` with the given request timeout
    pub fn new(url: &str, timeout_ms: u64) -> Result<Self, ValidatorError> {
        let endpoint = Endpoint::parse(url)?;
        if endpoint.tls && !cfg!(feature = "online") {
            return Err(ValidatorError::FeatureNotEnabled);
        }

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(CONNECT_TIMEOUT_MS))
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(&user_agent())
            .build();
        Ok(NuValidator { endpoint, agent })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// POST once; the error says whether another attempt is worthwhile
    fn post(&self, url: &str, html: &str) -> Result<String, (ValidatorError, bool)> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", "text/html; charset=utf-8")
            .set("Accept", "application/json")
            .send_string(html);

        match response {
            Ok(response) => response.into_string().map_err(|e| {
                let error = ValidatorError::InvalidResponse {
                    message: e.to_string(),
                };
                (error, false)
            }),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let error = ValidatorError::Api {
                    status,
                    message: body.chars().take(200).collect(),
                };
                Err((error, status >= 500 || status == 429))
            }
            Err(ureq::Error::Transport(transport)) => {
                let timed_out = std::error::Error::source(&transport)
                    .and_then(|source| source.downcast_ref::<io::Error>())
                    .map(|e| matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock))
                    .unwrap_or(false);
                let message = transport.to_string();
                let error = if timed_out {
                    ValidatorError::Timeout { message }
                } else {
                    ValidatorError::RequestFailed { message }
                };
                Err((error, true))
            }
        }
    }
}

impl ConformanceValidator for NuValidator {
    fn name(&self) -> &str {
        "nu"
    }

    fn validate(&self, html: &str) -> Result<Vec<ConformanceMessage>, ValidatorError> {
        let url = self.endpoint.url();
        info!(host = %self.endpoint.host, bytes = html.len(), "submitting document to Nu HTML Checker");

        let mut delay = RETRY_DELAY_MS;
        let mut attempt = 0;
        let body = loop {
            debug!(url = %url, attempt, "posting to validator");
            match self.post(&url, html) {
                Ok(body) => break body,
                Err((error, retry)) if retry && attempt < MAX_RETRIES => {
                    warn!(error = %error, attempt, "validator request failed, retrying");
                    std::thread::sleep(Duration::from_millis(delay));
                    delay *= 2;
                    attempt += 1;
                }
                Err((error, _)) => return Err(error),
            }
        };

        let messages = parse_response(&body)?;
        debug!(count = messages.len(), "validator returned messages");
        Ok(messages)
    }
}

#[derive(Debug, Deserialize)]
struct NuResponse {
    #[serde(default)]
    messages: Vec<NuMessage>,
}

#[derive(Debug, Deserialize)]
struct NuMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "subType", default)]
    sub_type: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(rename = "firstLine", default)]
    first_line: Option<u32>,
    #[serde(rename = "lastLine", default)]
    last_line: Option<u32>,
    #[serde(rename = "firstColumn", default)]
    first_column: Option<u32>,
}

/// Map a Nu JSON body to conformance messages
pub fn parse_response(body: &str) -> Result<Vec<ConformanceMessage>, ValidatorError> {
    let response: NuResponse =
        serde_json::from_str(body).map_err(|e| ValidatorError::InvalidResponse {
            message: e.to_string(),
        })?;

    let mut messages = Vec::with_capacity(response.messages.len());
    for m in response.messages {
        let severity = match (m.kind.as_str(), m.sub_type.as_deref()) {
            ("error", _) => Severity::Error,
            ("info", Some("warning")) => Severity::Warning,
            ("info", _) => Severity::Info,
            ("non-document-error", _) => {
                return Err(ValidatorError::Rejected { message: m.message });
            }
            (other, _) => {
                return Err(ValidatorError::InvalidResponse {
                    message: format!("unknown message type '{}'", other),
                });
            }
        };

        messages.push(ConformanceMessage {
            severity,
            message: m.message,
            line: m.first_line.or(m.last_line),
            column: m.first_column,
        });
    }

    Ok(messages)
}
