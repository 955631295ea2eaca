//! Interval scheduler — named jobs that feed synthetic ticks into the
//! matching pipeline.
//!
//! Each job publishes a `scheduler:tick` event per tenant that has an
//! enabled rule on that trigger, through the same [`EventGateway`] as any
//! other event — the scheduler has no special-cased execution path. The
//! per-job `IDLE -> RUNNING -> IDLE` state machine is the only mutual
//! exclusion in the system: an interval fire while a run is in flight is
//! skipped (never queued), and a manual trigger is rejected with a clear
//! already-running signal.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde_json::json;

use ringflow_domain::event::TriggerEvent;
use ringflow_domain::time::Timestamp;

use crate::gateway::EventGateway;
use crate::ports::{EventPublisher, RuleRepository};

/// Static description of a scheduler job.
#[derive(Debug, Clone, Copy)]
pub struct JobSpec {
    /// Stable identifier, e.g. `"trialSweep"`.
    pub name: &'static str,
    pub interval: Duration,
    /// Display string for operators, e.g. `"every 6 hours"`.
    pub interval_human: &'static str,
}

/// The product's built-in sweep jobs.
#[must_use]
pub fn default_jobs() -> Vec<JobSpec> {
    vec![
        JobSpec {
            name: "trialSweep",
            interval: Duration::from_secs(6 * 60 * 60),
            interval_human: "every 6 hours",
        },
        JobSpec {
            name: "usageSweep",
            interval: Duration::from_secs(60 * 60),
            interval_human: "every hour",
        },
        JobSpec {
            name: "appointmentSweep",
            interval: Duration::from_secs(5 * 60),
            interval_human: "every 5 minutes",
        },
    ]
}

/// Observable state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Idle,
    Running,
}

/// Status snapshot reported to operators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub name: &'static str,
    pub interval_ms: u64,
    pub interval_human: &'static str,
    pub state: JobState,
    pub last_run: Option<Timestamp>,
}

/// Errors from manual job triggering.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("unknown scheduler job: {0}")]
    UnknownJob(String),

    #[error("job {0} is already running")]
    AlreadyRunning(&'static str),
}

struct Job {
    spec: JobSpec,
    running: AtomicBool,
    last_run: Mutex<Option<Timestamp>>,
}

impl Job {
    fn new(spec: JobSpec) -> Self {
        Self {
            spec,
            running: AtomicBool::new(false),
            last_run: Mutex::new(None),
        }
    }

    fn last_run(&self) -> Option<Timestamp> {
        *self
            .last_run
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

struct Inner<R, P> {
    repo: R,
    gateway: EventGateway<P>,
    jobs: Vec<Arc<Job>>,
}

impl<R, P> Inner<R, P>
where
    R: RuleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Interval fire: skip when the previous run is still in flight.
    /// Returns whether the job actually ran.
    async fn fire(&self, job: &Job) -> bool {
        if job.running.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                job = job.spec.name,
                "tick overlapped a running job, skipping"
            );
            return false;
        }
        self.execute(job).await;
        true
    }

    /// Run the sweep and release the running flag. Callers must have set
    /// the flag beforehand.
    async fn execute(&self, job: &Job) {
        self.sweep(job).await;
        *job
            .last_run
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(ringflow_domain::time::now());
        job.running.store(false, Ordering::SeqCst);
    }

    /// Fan one tick event out per tenant with an enabled schedule rule.
    async fn sweep(&self, job: &Job) {
        let tenants = match self
            .repo
            .tenants_with_trigger(TriggerEvent::SchedulerTick)
            .await
        {
            Ok(tenants) => tenants,
            Err(err) => {
                tracing::error!(
                    job = job.spec.name,
                    error = %err,
                    "failed to load tenants for scheduler tick"
                );
                return;
            }
        };

        tracing::debug!(job = job.spec.name, tenants = tenants.len(), "scheduler sweep");
        for tenant in tenants {
            let payload = json!({
                "job": job.spec.name,
                "firedAt": ringflow_domain::time::now(),
            });
            if let Err(err) = self
                .gateway
                .publish_typed(tenant, TriggerEvent::SchedulerTick, payload)
                .await
            {
                tracing::error!(
                    job = job.spec.name,
                    tenant = %tenant,
                    error = %err,
                    "failed to publish scheduler tick"
                );
            }
        }
    }
}

/// Interval scheduler over a set of [`JobSpec`]s.
///
/// Cheap to clone: timer tasks and API handlers share one inner state.
pub struct Scheduler<R, P> {
    inner: Arc<Inner<R, P>>,
}

impl<R, P> Clone for Scheduler<R, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, P> Scheduler<R, P>
where
    R: RuleRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a scheduler with the built-in jobs.
    pub fn new(repo: R, gateway: EventGateway<P>) -> Self {
        Self::with_jobs(repo, gateway, default_jobs())
    }

    /// Create a scheduler with a custom job table.
    pub fn with_jobs(repo: R, gateway: EventGateway<P>, specs: Vec<JobSpec>) -> Self {
        Self {
            inner: Arc::new(Inner {
                repo,
                gateway,
                jobs: specs.into_iter().map(|s| Arc::new(Job::new(s))).collect(),
            }),
        }
    }

    /// Spawn one timer task per job.
    ///
    /// The first fire happens one full interval after start; ticks missed
    /// while a run is in flight are skipped, never queued.
    pub fn start(&self) {
        for job in &self.inner.jobs {
            let inner = Arc::clone(&self.inner);
            let job = Arc::clone(job);
            tracing::info!(
                job = job.spec.name,
                interval = job.spec.interval_human,
                "scheduler job started"
            );
            tokio::spawn(async move {
                let period = job.spec.interval;
                let mut timer =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);
                timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                loop {
                    timer.tick().await;
                    inner.fire(&job).await;
                }
            });
        }
    }

    /// Manually trigger a job. Returns as soon as the run is accepted.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::UnknownJob`] for names outside the job table,
    /// [`SchedulerError::AlreadyRunning`] when a run is in flight.
    pub fn run_now(&self, name: &str) -> Result<(), SchedulerError> {
        let job = self
            .inner
            .jobs
            .iter()
            .find(|j| j.spec.name == name)
            .ok_or_else(|| SchedulerError::UnknownJob(name.to_string()))?;

        if job.running.swap(true, Ordering::SeqCst) {
            return Err(SchedulerError::AlreadyRunning(job.spec.name));
        }

        tracing::info!(job = job.spec.name, "manual scheduler run accepted");
        let inner = Arc::clone(&self.inner);
        let job = Arc::clone(job);
        tokio::spawn(async move {
            inner.execute(&job).await;
        });
        Ok(())
    }

    /// Status snapshot of every job.
    #[must_use]
    pub fn status(&self) -> Vec<JobStatus> {
        self.inner
            .jobs
            .iter()
            .map(|job| JobStatus {
                name: job.spec.name,
                interval_ms: u64::try_from(job.spec.interval.as_millis()).unwrap_or(u64::MAX),
                interval_human: job.spec.interval_human,
                state: if job.running.load(Ordering::SeqCst) {
                    JobState::Running
                } else {
                    JobState::Idle
                },
                last_run: job.last_run(),
            })
            .collect()
    }
}
