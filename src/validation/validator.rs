use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;

use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::{content_types, http, http_status};
use crate::core::error::Result;
use crate::reporting::logging;

/// Decides whether a candidate string is a live URL.
///
/// Implementations must be shareable across every extractor task, hence
/// the `Send + Sync` bound.
#[async_trait]
pub trait ValidateUrl: Send + Sync {
    async fn validate(&self, candidate: &str) -> bool;
}

/// Outcome of probing a single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Reachable with a status in the accepted window
    Accepted(u16),
    /// The response advertises an image content type
    Image(String),
    /// Reachable, but the final status is outside the accepted window
    BadStatus(u16),
    /// Transport failure: DNS, refused connection, timeout, malformed URL
    Unreachable(String),
}

impl Verdict {
    /// Apply the acceptance policy to the metadata of a response.
    ///
    /// The content type is checked first, so an image is rejected
    /// whatever its status.
    pub fn from_response_parts(status: u16, content_type: Option<&str>) -> Self {
        if let Some(content_type) = content_type
            && is_image(content_type)
        {
            return Verdict::Image(content_type.to_string());
        }

        if (http_status::ACCEPT_MIN..http_status::ACCEPT_MAX_EXCLUSIVE).contains(&status) {
            Verdict::Accepted(status)
        } else {
            Verdict::BadStatus(status)
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Accepted(status) => write!(f, "accepted ({status})"),
            Verdict::Image(content_type) => write!(f, "response is an image ({content_type})"),
            Verdict::BadStatus(status) => write!(f, "rejected status {status}"),
            Verdict::Unreachable(description) => write!(f, "unreachable: {description}"),
        }
    }
}

fn is_image(content_type: &str) -> bool {
    let prefix = content_types::IMAGE_PREFIX;
    content_type.len() >= prefix.len()
        && content_type.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Validator issuing a `HEAD` request per candidate
#[derive(Debug, Clone)]
pub struct HttpValidator {
    client: reqwest::Client,
}

impl HttpValidator {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(http::MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.timeout_duration(), config.user_agent_header())
    }

    /// Probe a candidate and classify the response.
    ///
    /// Only headers are inspected; the response is dropped before returning so
    /// the connection goes back to the pool without reading a body.
    pub async fn probe(&self, candidate: &str) -> Verdict {
        match self.client.head(candidate).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                drop(response);

                Verdict::from_response_parts(status, content_type.as_deref())
            }
            Err(err) => {
                let description = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                Verdict::Unreachable(description)
            }
        }
    }
}

#[async_trait]
impl ValidateUrl for HttpValidator {
    async fn validate(&self, candidate: &str) -> bool {
        let verdict = self.probe(candidate).await;
        logging::log_verdict(candidate, &verdict);
        verdict.is_accepted()
    }
}
