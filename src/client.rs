//! Asynchronous request client for the pdf4me API.
//!
//! pdf4me answers document-AI requests either synchronously (`200` with the
//! result) or with `202 Accepted` and a location to poll. [`Pdf4meClient::async_request`]
//! hides that difference: it submits, polls the returned location at a fixed
//! interval until the job finishes, and bounds the total wait with a deadline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{Pdf4meConfig, PollPolicy};
use crate::error::{Pdf4meError, Result};
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// JSON body fields that may carry the polling location when the header is absent.
const LOCATION_FIELDS: &[&str] = &["location", "Location", "statusUrl", "pollingUrl"];

/// Terminal outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRequest {
    /// Status of the response that carried the result.
    pub status: u16,
    /// Raw result body.
    pub body: Vec<u8>,
    /// Number of poll requests issued (0 for a synchronous answer).
    pub polls: u32,
    /// Time spent between submit and the terminal response.
    pub elapsed: Duration,
}

enum Step {
    Done(HttpResponse),
    Pending(HttpResponse),
}

fn classify(response: HttpResponse) -> Result<Step> {
    match response.status {
        202 => Ok(Step::Pending(response)),
        200..=299 => Ok(Step::Done(response)),
        status => Err(Pdf4meError::api(status, response.text())),
    }
}

fn polling_location(response: &HttpResponse) -> Result<String> {
    if let Some(location) = response.header("location").filter(|l| !l.trim().is_empty()) {
        return Ok(location.trim().to_string());
    }

    let body: Option<Value> = serde_json::from_slice(&response.body).ok();
    body.as_ref()
        .and_then(|b| {
            LOCATION_FIELDS
                .iter()
                .find_map(|field| b.get(*field).and_then(Value::as_str))
        })
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string())
        .ok_or_else(|| {
            Pdf4meError::invalid_response("202 Accepted without a polling location")
        })
}

/// Client for the pdf4me API.
#[derive(Clone)]
pub struct Pdf4meClient {
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    policy: PollPolicy,
}

impl std::fmt::Debug for Pdf4meClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pdf4meClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Pdf4meClient {
    /// Creates a client talking to the configured API with real time.
    pub fn new(config: Pdf4meConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_parts(
            Arc::new(transport),
            Arc::new(SystemClock),
            config.poll_policy(),
        ))
    }

    /// Creates a client from explicit collaborators.
    pub fn with_parts(
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            transport,
            clock,
            policy,
        }
    }

    /// Polling cadence and deadline in use.
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Time source shared with result timestamps.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Fetches a remote document through the authenticated transport.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.transport.download(url).await
    }

    /// Submits `payload` to `path` and waits for the terminal result.
    ///
    /// # Errors
    ///
    /// * [`Pdf4meError::Api`] for any status other than 2xx/202, at submit or poll time.
    ///   Polling stops at the first such response.
    /// * [`Pdf4meError::Timeout`] when the job is still pending once the deadline passes,
    ///   or a poll request is still in flight when its share of the deadline runs out.
    /// * [`Pdf4meError::Network`] for transport failures.
    /// * [`Pdf4meError::InvalidResponse`] for a `202` without a polling location.
    pub async fn async_request<T>(&self, path: &str, payload: &T) -> Result<CompletedRequest>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload)?;
        let started = self.clock.now();

        let submitted = self.transport.post_json(path, &body).await?;
        let accepted = match classify(submitted)? {
            Step::Done(response) => {
                debug!(path, status = response.status, "pdf4me answered synchronously");
                return Ok(CompletedRequest {
                    status: response.status,
                    body: response.body,
                    polls: 0,
                    elapsed: self.clock.now().duration_since(started),
                });
            }
            Step::Pending(response) => response,
        };

        let location = polling_location(&accepted)?;
        debug!(path, %location, "pdf4me accepted request, polling");

        let mut polls: u32 = 0;
        loop {
            let remaining = self.remaining(started);
            self.clock.sleep(self.policy.interval.min(remaining)).await;
            polls += 1;

            // A poll sent at the deadline still gets one interval to answer.
            let budget = self.remaining(started).max(self.policy.interval);
            let response = tokio::select! {
                biased;
                response = self.transport.get(&location) => response?,
                _ = self.clock.timer(budget) => {
                    let elapsed = self.clock.now().duration_since(started);
                    warn!(path, polls, ?elapsed, "pdf4me poll did not answer in time");
                    return Err(Pdf4meError::Timeout { elapsed, polls });
                }
            };

            match classify(response)? {
                Step::Done(response) => {
                    let elapsed = self.clock.now().duration_since(started);
                    info!(path, polls, ?elapsed, "pdf4me job completed");
                    return Ok(CompletedRequest {
                        status: response.status,
                        body: response.body,
                        polls,
                        elapsed,
                    });
                }
                Step::Pending(_) => {
                    let elapsed = self.clock.now().duration_since(started);
                    if elapsed >= self.policy.max_wait {
                        warn!(path, polls, ?elapsed, "pdf4me job did not finish in time");
                        return Err(Pdf4meError::Timeout { elapsed, polls });
                    }
                    debug!(path, polls, "pdf4me job still processing");
                }
            }
        }
    }

    fn remaining(&self, started: Instant) -> Duration {
        let elapsed = self.clock.now().duration_since(started);
        self.policy.max_wait.saturating_sub(elapsed)
    }
}
