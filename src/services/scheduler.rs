//! Periodic job scheduler
//!
//! Drives the two sweeps on fixed intervals by submitting jobs to their
//! lanes: the status sweep every 3 hours on the high lane, the reminder
//! sweep every 10 minutes on the default lane. Execution happens in the
//! job worker, fully decoupled from request handling.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::SchedulerConfig;
use crate::services::queue::{Job, JobQueue, QueueLane};

pub struct Scheduler {
    queue: JobQueue,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(queue: JobQueue, config: SchedulerConfig) -> Self {
        Self { queue, config }
    }

    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        info!(
            status_interval_secs = self.config.status_sweep_interval_secs,
            reminder_interval_secs = self.config.reminder_sweep_interval_secs,
            "Starting scheduler"
        );

        vec![
            Self::every(
                Duration::from_secs(self.config.status_sweep_interval_secs),
                self.queue.clone(),
                QueueLane::High,
                || Job::UpdateEventStatuses,
            ),
            Self::every(
                Duration::from_secs(self.config.reminder_sweep_interval_secs),
                self.queue,
                QueueLane::Default,
                || Job::SendReminders,
            ),
        ]
    }

    fn every(
        period: Duration,
        queue: JobQueue,
        lane: QueueLane,
        job: fn() -> Job,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                queue.submit(lane, job());
            }
        })
    }
}
