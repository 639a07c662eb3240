use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One email to be delivered by the external queue infrastructure. The core
/// only enqueues; delivery, retries and failures stay on the other side of
/// this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct MailJob {
    pub queue: &'static str,
    pub mailer: String,
    pub action: String,
    pub delivery: &'static str,
    pub params: serde_json::Value,
}

pub const MAILERS_QUEUE: &str = "mailers";
pub const DELIVER_NOW: &str = "deliver_now";

#[derive(Error, Debug)]
pub enum MailQueueError {
    #[error("mail queue closed")]
    Closed,
}

pub trait MailQueue: Send + Sync {
    fn enqueue(&self, job: MailJob) -> Result<(), MailQueueError>;
}

/// Production queue: fire-and-forget onto an unbounded channel drained by a
/// worker task.
pub struct ChannelMailQueue {
    tx: UnboundedSender<MailJob>,
}

impl ChannelMailQueue {
    pub fn new() -> (Self, UnboundedReceiver<MailJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MailQueue for ChannelMailQueue {
    fn enqueue(&self, job: MailJob) -> Result<(), MailQueueError> {
        self.tx.send(job).map_err(|_| MailQueueError::Closed)
    }
}

/// Drains the queue. Actual SMTP delivery belongs to external infrastructure;
/// here each job is logged and dropped.
pub async fn run_worker(mut rx: UnboundedReceiver<MailJob>) {
    while let Some(job) = rx.recv().await {
        tracing::info!(
            queue = job.queue,
            mailer = %job.mailer,
            action = %job.action,
            "delivering mail job"
        );
    }
}

/// Captures enqueued jobs for assertions in tests.
#[derive(Default)]
pub struct RecordingMailQueue {
    jobs: Mutex<Vec<MailJob>>,
}

impl RecordingMailQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> Vec<MailJob> {
        self.jobs.lock().clone()
    }
}

impl MailQueue for RecordingMailQueue {
    fn enqueue(&self, job: MailJob) -> Result<(), MailQueueError> {
        self.jobs.lock().push(job);
        Ok(())
    }
}
