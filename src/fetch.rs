//! Background HTTP fetching.
//!
//! The frame loop never blocks on the network. Images and audio each get their own lane: a job
//! queue with its own worker threads, so a hung image request cannot hold back a clip. Workers
//! skip jobs that a newer request of the same kind has superseded, before and after fetching.
//! The main thread drains finished requests once per frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{PresenterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Image,
    Audio,
}

#[derive(Debug)]
struct FetchJob {
    id: RequestId,
    kind: FetchKind,
    url: String,
}

/// A finished request.
#[derive(Debug)]
pub struct Fetched {
    pub id: RequestId,
    pub kind: FetchKind,
    pub url: String,
    pub body: Result<Vec<u8>>,
}

/// Newest request id per kind; anything older is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatestRequests {
    image: Option<RequestId>,
    audio: Option<RequestId>,
}

impl LatestRequests {
    pub fn record(&mut self, kind: FetchKind, id: RequestId) {
        *self.slot(kind) = Some(id);
    }

    pub fn is_latest(&self, kind: FetchKind, id: RequestId) -> bool {
        let latest = match kind {
            FetchKind::Image => self.image,
            FetchKind::Audio => self.audio,
        };
        latest == Some(id)
    }

    /// Keeps only results answering the newest request of their kind.
    pub fn retain_latest(&self, finished: impl IntoIterator<Item = Fetched>) -> Vec<Fetched> {
        finished
            .into_iter()
            .filter(|fetched| {
                let latest = self.is_latest(fetched.kind, fetched.id);
                if !latest {
                    debug!(request = fetched.id.get(), kind = ?fetched.kind, "Dropping superseded result");
                }
                latest
            })
            .collect()
    }

    fn slot(&mut self, kind: FetchKind) -> &mut Option<RequestId> {
        match kind {
            FetchKind::Image => &mut self.image,
            FetchKind::Audio => &mut self.audio,
        }
    }
}

/// Job queue and newest id shared with the workers of one kind.
struct Lane {
    jobs: Sender<FetchJob>,
    latest: Arc<AtomicU64>,
}

impl Lane {
    fn spawn(
        kind: FetchKind,
        worker_count: usize,
        client: &Client,
        results: &Sender<Fetched>,
    ) -> Result<Self> {
        let (job_tx, job_rx) = unbounded::<FetchJob>();
        let latest = Arc::new(AtomicU64::new(0));

        for index in 0..worker_count.max(1) {
            let client = client.clone();
            let jobs = job_rx.clone();
            let latest = Arc::clone(&latest);
            let results = results.clone();
            // Detached: a worker stuck in a request must not delay shutdown.
            thread::Builder::new()
                .name(format!("fetch-{kind:?}-{index}").to_lowercase())
                .spawn(move || run_worker(client, jobs, latest, results))?;
        }

        Ok(Self {
            jobs: job_tx,
            latest,
        })
    }
}

/// Dropping the fetcher closes both job queues. Idle workers exit at once; busy ones exit
/// when their current request returns.
pub struct Fetcher {
    image: Lane,
    audio: Lane,
    results: Receiver<Fetched>,
    next_id: u64,
}

impl Fetcher {
    /// Spawns `worker_count` workers for each kind.
    pub fn spawn(worker_count: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).no_proxy().build()?;
        let (result_tx, result_rx) = unbounded::<Fetched>();

        Ok(Self {
            image: Lane::spawn(FetchKind::Image, worker_count, &client, &result_tx)?,
            audio: Lane::spawn(FetchKind::Audio, worker_count, &client, &result_tx)?,
            results: result_rx,
            next_id: 0,
        })
    }

    pub fn submit(&mut self, kind: FetchKind, url: &str) -> Result<RequestId> {
        self.next_id += 1;
        let id = RequestId::new(self.next_id);
        let lane = match kind {
            FetchKind::Image => &self.image,
            FetchKind::Audio => &self.audio,
        };

        lane.latest.store(id.get(), Ordering::Release);
        lane.jobs
            .send(FetchJob {
                id,
                kind,
                url: url.to_string(),
            })
            .map_err(|_| PresenterError::FetcherClosed)?;
        Ok(id)
    }

    /// Finished requests, without waiting.
    pub fn drain(&self) -> impl Iterator<Item = Fetched> + '_ {
        self.results.try_iter()
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Fetched> {
        self.results.recv_timeout(timeout).ok()
    }
}

fn is_superseded(id: RequestId, latest: &AtomicU64) -> bool {
    id.get() < latest.load(Ordering::Acquire)
}

fn run_worker(
    client: Client,
    jobs: Receiver<FetchJob>,
    latest: Arc<AtomicU64>,
    results: Sender<Fetched>,
) {
    for job in jobs.iter() {
        if is_superseded(job.id, &latest) {
            debug!(request = job.id.get(), url = %job.url, "Skipping superseded request");
            continue;
        }

        debug!(request = job.id.get(), url = %job.url, "Fetching");
        let body = fetch(&client, &job.url);
        if let Err(err) = &body {
            debug!(request = job.id.get(), url = %job.url, %err, "Fetch failed");
        }
        if is_superseded(job.id, &latest) {
            debug!(request = job.id.get(), "Discarding superseded response");
            continue;
        }

        let fetched = Fetched {
            id: job.id,
            kind: job.kind,
            url: job.url,
            body,
        };
        if results.send(fetched).is_err() {
            break;
        }
    }
}

fn fetch(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
