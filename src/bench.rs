//! Load generator for a running broker.
//!
//! Spawns a number of concurrent workers that each post a fixed number of
//! publishes to `<url>/publish` and records the latency of every request.
//! Failed requests are counted and do not stop the run.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::{debug, info};

use crate::utils::error::BenchError;

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub url: String,
    pub tasks: usize,
    pub messages_per_task: usize,
    pub topic: String,
}

impl BenchConfig {
    /// Total number of publishes the run will attempt, saturating on overflow.
    pub fn total_requests(&self) -> usize {
        self.tasks.saturating_mul(self.messages_per_task)
    }
}

#[derive(Debug, Default)]
pub struct BenchReport {
    samples: Vec<Duration>,
    pub failures: usize,
}

impl BenchReport {
    pub fn from_samples(mut samples: Vec<Duration>, failures: usize) -> Self {
        samples.sort();
        Self { samples, failures }
    }

    pub fn requests(&self) -> usize {
        self.samples.len()
    }

    /// Latency at percentile `pct` (0-100), picking the sample at index
    /// `round(pct / 100 * (n - 1))`. Zero when nothing was measured.
    pub fn percentile(&self, pct: f64) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let last = self.samples.len() - 1;
        let idx = ((pct / 100.0) * last as f64).round() as usize;
        self.samples[idx.min(last)]
    }
}

pub async fn run(config: &BenchConfig) -> Result<BenchReport, BenchError> {
    let endpoint = format!("{}/publish", config.url.trim_end_matches('/'));
    info!(
        %endpoint,
        tasks = config.tasks,
        messages = config.messages_per_task,
        total = config.total_requests(),
        "Starting load run"
    );

    let mut workers = Vec::new();
    for _ in 0..config.tasks {
        let client = reqwest::Client::builder().build()?;
        let endpoint = endpoint.clone();
        let topic = config.topic.clone();
        let messages = config.messages_per_task;

        workers.push(tokio::spawn(async move {
            let mut samples = Vec::new();
            let mut failures = 0usize;
            for _ in 0..messages {
                let start = Instant::now();
                let result = client
                    .post(&endpoint)
                    .json(&json!({ "topic": topic, "data": "x" }))
                    .send()
                    .await
                    .and_then(|resp| resp.error_for_status());
                samples.push(start.elapsed());
                if let Err(e) = result {
                    debug!("Publish failed: {e}");
                    failures += 1;
                }
            }
            (samples, failures)
        }));
    }

    let mut samples = Vec::new();
    let mut failures = 0;
    for worker in workers {
        let (worker_samples, worker_failures) = worker.await?;
        samples.extend(worker_samples);
        failures += worker_failures;
    }

    Ok(BenchReport::from_samples(samples, failures))
}
