use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use tokio::{sync::Notify, task::JoinHandle};

use crate::access_control::{
    domain::{
        model::events::authorization_decision_audited_event::AuthorizationDecisionAuditedEvent,
        services::authorization_audit_recorder::AuthorizationAuditRecorder,
    },
    infrastructure::persistence::repositories::authorization_decision_audit_repository::AuthorizationDecisionAuditRepository,
};

pub const DEFAULT_AUDIT_QUEUE_CAPACITY: usize = 1024;

const FALLBACK_TARGET: &str = "authz::audit_fallback";

struct AuditQueue {
    buffer: Mutex<VecDeque<AuthorizationDecisionAuditedEvent>>,
    capacity: usize,
    notify: Notify,
    dropped: AtomicU64,
    closed: AtomicBool,
}

impl AuditQueue {
    fn buffer(&self) -> MutexGuard<'_, VecDeque<AuthorizationDecisionAuditedEvent>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn drain(&self) -> Vec<AuthorizationDecisionAuditedEvent> {
        self.buffer().drain(..).collect()
    }
}

/// Bounded, drop-oldest audit queue drained by one background task.
///
/// `record` never waits on the sink: when the queue is full the oldest
/// pending record is discarded (and counted) so the newest decisions are
/// kept. Sink failures go to the `authz::audit_fallback` log target.
#[derive(Clone)]
pub struct AuthorizationAuditRecorderImpl {
    queue: Arc<AuditQueue>,
}

pub struct AuditWorkerHandle {
    queue: Arc<AuditQueue>,
    repository: Arc<dyn AuthorizationDecisionAuditRepository>,
    worker: JoinHandle<()>,
}

impl AuthorizationAuditRecorderImpl {
    /// Starts the drain task on the current tokio runtime.
    pub fn spawn(
        repository: Arc<dyn AuthorizationDecisionAuditRepository>,
        capacity: usize,
    ) -> (Self, AuditWorkerHandle) {
        let queue = Arc::new(AuditQueue {
            buffer: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            notify: Notify::new(),
            dropped: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        });

        let worker = tokio::spawn(run_worker(queue.clone(), repository.clone()));

        (
            Self {
                queue: queue.clone(),
            },
            AuditWorkerHandle {
                queue,
                repository,
                worker,
            },
        )
    }

    pub fn dropped_count(&self) -> u64 {
        self.queue.dropped.load(Ordering::Relaxed)
    }

    pub fn pending(&self) -> usize {
        self.queue.buffer().len()
    }
}

impl AuthorizationAuditRecorder for AuthorizationAuditRecorderImpl {
    fn record(&self, event: AuthorizationDecisionAuditedEvent) {
        if self.queue.closed.load(Ordering::Acquire) {
            log_fallback(&event, "audit recorder is shut down");
            return;
        }

        let evicted = {
            let mut buffer = self.queue.buffer();
            let evicted = if buffer.len() >= self.queue.capacity {
                buffer.pop_front()
            } else {
                None
            };
            buffer.push_back(event);
            evicted
        };

        if let Some(evicted) = evicted {
            let dropped = self.queue.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::warn!(
                target: FALLBACK_TARGET,
                dropped_total = dropped,
                capacity = self.queue.capacity,
                principal_id = %evicted.principal_id,
                operation = %evicted.operation,
                decision = evicted.effect.as_str(),
                "audit queue full; dropped oldest record"
            );
        }

        self.queue.notify.notify_one();
    }
}

impl AuditWorkerHandle {
    /// Stops accepting records and waits until everything queued is written.
    pub async fn shutdown(self) {
        self.queue.closed.store(true, Ordering::Release);
        self.queue.notify.notify_one();

        if let Err(error) = self.worker.await {
            tracing::error!(error = %error, "audit worker terminated abnormally");
        }

        // Records that raced with the close flag.
        for event in self.queue.drain() {
            write(self.repository.as_ref(), &event).await;
        }
    }
}

async fn run_worker(
    queue: Arc<AuditQueue>,
    repository: Arc<dyn AuthorizationDecisionAuditRepository>,
) {
    loop {
        let batch = queue.drain();

        if batch.is_empty() {
            if queue.closed.load(Ordering::Acquire) {
                break;
            }
            queue.notify.notified().await;
            continue;
        }

        for event in &batch {
            write(repository.as_ref(), event).await;
        }
    }
}

async fn write(
    repository: &dyn AuthorizationDecisionAuditRepository,
    event: &AuthorizationDecisionAuditedEvent,
) {
    if let Err(error) = repository.save_decision(event).await {
        log_fallback(event, &error.to_string());
    }
}

fn log_fallback(event: &AuthorizationDecisionAuditedEvent, error: &str) {
    tracing::warn!(
        target: FALLBACK_TARGET,
        error,
        event_id = %event.event_id,
        principal_id = %event.principal_id,
        operation = %event.operation,
        decision = event.effect.as_str(),
        reason = event.reason.map(|r| r.as_str()),
        scope = %event.rendered_scope(),
        request_id = event.request_id.as_deref(),
        occurred_at = %event.occurred_at,
        "audit record not persisted"
    );
}
