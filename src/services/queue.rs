//! In-process job queue with named priority lanes
//!
//! Bookings, cancellations and sweeps hand their side effects to this queue
//! instead of running them on the request path. Submission is
//! fire-and-forget: it never blocks and never surfaces a failure to the
//! caller; execution errors are logged and swallowed by the worker.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::database::DatabaseService;
use crate::models::notification::NotificationKind;
use crate::services::sweep::SweepService;
use crate::utils::errors::Result;

/// Named lanes: status sweeps run high, reminder fan-out default,
/// notification persistence low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueLane {
    High,
    Default,
    Low,
}

impl QueueLane {
    fn name(&self) -> &'static str {
        match self {
            QueueLane::High => "high",
            QueueLane::Default => "default",
            QueueLane::Low => "low",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Job {
    Notify {
        user_id: i64,
        event_id: Option<i64>,
        kind: NotificationKind,
        message: String,
    },
    UpdateEventStatuses,
    SendReminders,
}

impl Job {
    fn name(&self) -> &'static str {
        match self {
            Job::Notify { .. } => "notify",
            Job::UpdateEventStatuses => "update_event_statuses",
            Job::SendReminders => "send_reminders",
        }
    }
}

/// Cloneable submission handle, one sender per lane.
#[derive(Debug, Clone)]
pub struct JobQueue {
    high: mpsc::UnboundedSender<Job>,
    default_lane: mpsc::UnboundedSender<Job>,
    low: mpsc::UnboundedSender<Job>,
}

/// Receiving ends, consumed once by [`JobWorker::spawn`].
pub struct JobReceivers {
    high: mpsc::UnboundedReceiver<Job>,
    default_lane: mpsc::UnboundedReceiver<Job>,
    low: mpsc::UnboundedReceiver<Job>,
}

impl JobQueue {
    pub fn new() -> (Self, JobReceivers) {
        let (high_tx, high_rx) = mpsc::unbounded_channel();
        let (default_tx, default_rx) = mpsc::unbounded_channel();
        let (low_tx, low_rx) = mpsc::unbounded_channel();

        (
            Self {
                high: high_tx,
                default_lane: default_tx,
                low: low_tx,
            },
            JobReceivers {
                high: high_rx,
                default_lane: default_rx,
                low: low_rx,
            },
        )
    }

    /// Submit a job to a lane. Never blocks; a closed lane drops the job
    /// with a warning.
    pub fn submit(&self, lane: QueueLane, job: Job) {
        let sender = match lane {
            QueueLane::High => &self.high,
            QueueLane::Default => &self.default_lane,
            QueueLane::Low => &self.low,
        };

        debug!(lane = lane.name(), job = job.name(), "Submitting job");
        if let Err(e) = sender.send(job) {
            warn!(lane = lane.name(), job = e.0.name(), "Job dropped, lane closed");
        }
    }

    /// Submit one notification record for asynchronous persistence.
    pub fn notify(
        &self,
        user_id: i64,
        event_id: Option<i64>,
        kind: NotificationKind,
        message: String,
    ) {
        self.submit(
            QueueLane::Low,
            Job::Notify {
                user_id,
                event_id,
                kind,
                message,
            },
        );
    }
}

/// Executes queued jobs, one task per lane.
#[derive(Clone)]
pub struct JobWorker {
    db: DatabaseService,
    sweeps: SweepService,
}

impl JobWorker {
    pub fn new(db: DatabaseService, queue: JobQueue) -> Self {
        let sweeps = SweepService::new(db.clone(), queue);
        Self { db, sweeps }
    }

    pub fn spawn(self, receivers: JobReceivers) -> Vec<JoinHandle<()>> {
        vec![
            tokio::spawn(self.clone().run_lane(QueueLane::High, receivers.high)),
            tokio::spawn(
                self.clone()
                    .run_lane(QueueLane::Default, receivers.default_lane),
            ),
            tokio::spawn(self.run_lane(QueueLane::Low, receivers.low)),
        ]
    }

    async fn run_lane(self, lane: QueueLane, mut rx: mpsc::UnboundedReceiver<Job>) {
        info!(lane = lane.name(), "Job worker started");
        while let Some(job) = rx.recv().await {
            let name = job.name();
            // Failures must never propagate back to the request that
            // enqueued the job.
            if let Err(e) = self.execute(job).await {
                error!(lane = lane.name(), job = name, error = %e, "Job failed");
            }
        }
        info!(lane = lane.name(), "Job worker stopped");
    }

    async fn execute(&self, job: Job) -> Result<()> {
        match job {
            Job::Notify {
                user_id,
                event_id,
                kind,
                message,
            } => {
                self.db
                    .notifications
                    .create(user_id, event_id, kind, &message)
                    .await?;
                info!(user_id, event_id, kind = kind.display_name(), "Notification delivered");
                Ok(())
            }
            Job::UpdateEventStatuses => self.sweeps.update_event_statuses().await,
            Job::SendReminders => self.sweeps.send_reminder_notifications().await,
        }
    }
}
