//! InfluxDB 1.x write queue.
//!
//! `enqueue` renders the batch immediately (so entries carry the time they
//! were collected) and hands it to a background task, which POSTs it to
//! `/write` and retries failed writes up to the batch's retry hint. Only
//! transport failures and 5xx responses are retried.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::entry::TimeSeriesEntry;

use super::Sink;
use super::error::SinkError;
use super::line_protocol::render_batch;

/// Default delay between delivery attempts.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Configuration for the InfluxDB sink.
#[derive(Debug, Clone)]
pub struct InfluxConfig {
    /// Server URL, e.g. `http://localhost:8086`
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Delay between delivery attempts
    pub retry_delay: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl InfluxConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout_secs: 30,
        }
    }

    /// Authenticate with HTTP basic auth.
    pub fn with_credentials(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// A rendered batch waiting for delivery.
#[derive(Debug)]
struct QueuedWrite {
    body: String,
    target: String,
    retry_hint: u32,
}

/// Sink that writes to InfluxDB from a background task.
///
/// Dropping the sink closes the queue; the writer task finishes delivering
/// what is already queued and then exits.
#[derive(Debug, Clone)]
pub struct InfluxSink {
    tx: mpsc::UnboundedSender<QueuedWrite>,
}

impl InfluxSink {
    /// Create the sink and spawn its writer task on the current runtime.
    pub fn spawn(config: InfluxConfig) -> Result<(Self, JoinHandle<()>), SinkError> {
        let writer = InfluxWriter::new(config)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(writer.run(rx));
        Ok((Self { tx }, handle))
    }
}

impl Sink for InfluxSink {
    fn enqueue(&self, entries: Vec<TimeSeriesEntry>, retry_hint: u32, target: &str) {
        let body = render_batch(&entries, Utc::now().timestamp_nanos_opt());
        if body.is_empty() {
            return;
        }

        let write = QueuedWrite {
            body,
            target: target.to_string(),
            retry_hint,
        };
        if self.tx.send(write).is_err() {
            error!(
                target_db = target,
                count = entries.len(),
                "InfluxDB writer has stopped, dropping batch"
            );
        }
    }
}

struct InfluxWriter {
    http: reqwest::Client,
    write_url: String,
    username: Option<String>,
    password: Option<String>,
    retry_delay: Duration,
}

impl InfluxWriter {
    fn new(config: InfluxConfig) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            write_url: format!("{}/write", config.url.trim_end_matches('/')),
            username: config.username,
            password: config.password,
            retry_delay: config.retry_delay,
        })
    }

    async fn run(self, mut rx: mpsc::UnboundedReceiver<QueuedWrite>) {
        while let Some(write) = rx.recv().await {
            self.deliver(&write).await;
        }
        debug!("InfluxDB write queue closed");
    }

    /// Try a write up to `retry_hint` times (at least once). Writes the
    /// server refuses with a 4xx are dropped after the first attempt.
    async fn deliver(&self, write: &QueuedWrite) {
        let attempts = write.retry_hint.max(1);
        for attempt in 1..=attempts {
            match self.write(&write.body, &write.target).await {
                Ok(()) => {
                    debug!(target_db = %write.target, attempt, "Wrote batch to InfluxDB");
                    return;
                }
                Err(e) if !e.is_retryable() => {
                    error!(target_db = %write.target, attempt, error = %e, "InfluxDB rejected batch, dropping it");
                    return;
                }
                Err(e) => {
                    warn!(target_db = %write.target, attempt, attempts, error = %e, "InfluxDB write failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }
        error!(target_db = %write.target, attempts, "Giving up on InfluxDB batch");
    }

    async fn write(&self, body: &str, target: &str) -> Result<(), SinkError> {
        let mut request = self
            .http
            .post(&self.write_url)
            .query(&[("db", target), ("precision", "ns")])
            .body(body.to_string());

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
