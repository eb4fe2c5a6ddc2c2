//! Refresh loop — keeps the rendered diagram current on a fixed interval.
//!
//! The loop performs one fetch+render immediately, then one per period.
//! A manual trigger runs an immediate refresh and resets the interval, so
//! the next automatic tick is a full period after the manual one and no
//! duplicate timers accumulate.
//!
//! Every fetch is spawned as its own task tagged with a monotonically
//! increasing sequence number; a completion is applied only when its
//! sequence number is greater than the last applied one. A slow response
//! therefore never overwrites a fresher snapshot.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use autoviz_domain::diagram::DiagramResponse;
use autoviz_domain::time::{self, Timestamp};

use crate::ports::AutomationSource;
use crate::services::diagram_service::DiagramService;

/// Status text shown while no successful snapshot exists.
pub const STATUS_ERROR: &str = "Error";

/// Message carried by the placeholder snapshot before the first refresh
/// completes.
pub const PENDING_MESSAGE: &str = "Diagram not generated yet";

/// The most recently applied refresh result.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Sequence number of the fetch that produced this snapshot.
    pub seq: u64,
    pub response: DiagramResponse,
    pub refreshed_at: Timestamp,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            seq: 0,
            response: DiagramResponse::failure(PENDING_MESSAGE),
            refreshed_at: time::now(),
        }
    }

    /// One-line status for the dashboard header.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.response.success {
            format!(
                "Last updated {} ({} automations)",
                self.refreshed_at.format("%H:%M:%S"),
                self.response.count.unwrap_or(0)
            )
        } else {
            STATUS_ERROR.to_string()
        }
    }
}

/// The refresh loop has stopped and can no longer serve requests.
#[derive(Debug, thiserror::Error)]
#[error("refresh loop is no longer running")]
pub struct RefreshClosed;

/// Clonable handle given to driving adapters.
#[derive(Clone)]
pub struct RefreshHandle {
    snapshot_rx: watch::Receiver<Snapshot>,
    manual_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Current snapshot, whatever its age.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Request an immediate refresh without waiting for the result.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshClosed`] when the loop task has stopped.
    pub async fn trigger(&self) -> Result<(), RefreshClosed> {
        self.manual_tx.send(()).await.map_err(|_| RefreshClosed)
    }

    /// Request an immediate refresh and wait for a snapshot newer than
    /// the one current at call time.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshClosed`] when the loop task has stopped.
    pub async fn trigger_and_wait(&self) -> Result<Snapshot, RefreshClosed> {
        let mut rx = self.snapshot_rx.clone();
        let baseline = rx.borrow().seq;
        self.manual_tx.send(()).await.map_err(|_| RefreshClosed)?;
        loop {
            rx.changed().await.map_err(|_| RefreshClosed)?;
            let snapshot = rx.borrow().clone();
            if snapshot.seq > baseline {
                return Ok(snapshot);
            }
        }
    }
}

/// Owns the interval timer and publishes snapshots.
pub struct RefreshLoop<S> {
    service: Arc<DiagramService<S>>,
    period: Duration,
    snapshot_tx: watch::Sender<Snapshot>,
    manual_rx: mpsc::Receiver<()>,
}

impl<S> RefreshLoop<S>
where
    S: AutomationSource + Send + Sync + 'static,
{
    /// Create the loop and its handle. The loop does nothing until
    /// [`run`](Self::run) is awaited (typically inside `tokio::spawn`).
    #[must_use]
    pub fn new(service: DiagramService<S>, period: Duration) -> (Self, RefreshHandle) {
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::initial());
        let (manual_tx, manual_rx) = mpsc::channel(8);
        (
            Self {
                service: Arc::new(service),
                period,
                snapshot_tx,
                manual_rx,
            },
            RefreshHandle {
                snapshot_rx,
                manual_tx,
            },
        )
    }

    /// Drive the loop until every handle is dropped.
    pub async fn run(self) {
        let Self {
            service,
            period,
            snapshot_tx,
            mut manual_rx,
        } = self;

        let (done_tx, mut done_rx) = mpsc::channel::<(u64, DiagramResponse)>(16);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut next_seq: u64 = 0;
        let mut applied: u64 = 0;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    next_seq += 1;
                    spawn_fetch(Arc::clone(&service), next_seq, done_tx.clone());
                }
                received = manual_rx.recv() => {
                    let Some(()) = received else { break };
                    // Re-arm: next automatic tick a full period from now.
                    interval.reset();
                    next_seq += 1;
                    tracing::debug!(seq = next_seq, "manual refresh requested");
                    spawn_fetch(Arc::clone(&service), next_seq, done_tx.clone());
                }
                Some((seq, response)) = done_rx.recv() => {
                    if seq > applied {
                        applied = seq;
                        let snapshot = Snapshot {
                            seq,
                            response,
                            refreshed_at: time::now(),
                        };
                        if snapshot_tx.send(snapshot).is_err() {
                            break;
                        }
                    } else {
                        tracing::debug!(seq, applied, "discarding stale refresh result");
                    }
                }
            }
        }
    }
}

fn spawn_fetch<S>(
    service: Arc<DiagramService<S>>,
    seq: u64,
    done_tx: mpsc::Sender<(u64, DiagramResponse)>,
) where
    S: AutomationSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let response = service.build_diagram().await;
        let _ = done_tx.send((seq, response)).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::TimeZone;

    use autoviz_domain::automation::Automation;
    use autoviz_domain::error::VizError;

    use crate::render::RenderMode;

    const PERIOD: Duration = Duration::from_secs(30);

    fn automations(n: usize) -> Vec<Automation> {
        (0..n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i.to_string(),
                    "alias": format!("Auto {i}"),
                }))
                .unwrap()
            })
            .collect()
    }

    /// Source that counts calls and replays a script of (delay, count)
    /// entries, falling back to instant single-automation responses.
    struct ScriptedSource {
        calls: Arc<AtomicUsize>,
        script: Mutex<VecDeque<(Duration, usize)>>,
    }

    impl ScriptedSource {
        fn instant() -> (Self, Arc<AtomicUsize>) {
            Self::with_script(vec![])
        }

        fn with_script(script: Vec<(Duration, usize)>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                    script: Mutex::new(script.into()),
                },
                calls,
            )
        }
    }

    impl AutomationSource for ScriptedSource {
        async fn fetch_automations(&self) -> Result<Vec<Automation>, VizError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let entry = self.script.lock().unwrap().pop_front();
            let (delay, count) = entry.unwrap_or((Duration::ZERO, 1));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(automations(count))
        }
    }

    fn start(source: ScriptedSource, period: Duration) -> RefreshHandle {
        let service = DiagramService::new(source, RenderMode::Cards);
        let (refresh_loop, handle) = RefreshLoop::new(service, period);
        tokio::spawn(refresh_loop.run());
        handle
    }

    #[tokio::test(start_paused = true)]
    async fn should_fetch_once_immediately_then_every_period() {
        let (source, calls) = ScriptedSource::instant();
        let _handle = start(source, PERIOD);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        tokio::time::sleep(PERIOD).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_rebase_interval_after_manual_refresh() {
        let (source, calls) = ScriptedSource::instant();
        let handle = start(source, PERIOD);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Manual trigger at t=20s.
        tokio::time::sleep(Duration::from_secs(20)).await;
        handle.trigger().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The tick that was due at t=30s must not fire.
        tokio::time::sleep(Duration::from_secs(25)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // One full period after the manual trigger it fires again.
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_discard_stale_completion_after_fresher_one() {
        // First fetch takes 50s and yields 1 automation; the manual fetch
        // takes 1s and yields 2. The slow completion must not win.
        let (source, calls) = ScriptedSource::with_script(vec![
            (Duration::from_secs(50), 1),
            (Duration::from_secs(1), 2),
        ]);
        let handle = start(source, Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.trigger().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.seq, 2);
        assert_eq!(snapshot.response.count, Some(2));

        // Let the slow fetch complete, then confirm it was dropped.
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.seq, 2);
        assert_eq!(snapshot.response.count, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn should_return_fresh_snapshot_from_trigger_and_wait() {
        let (source, _calls) = ScriptedSource::instant();
        let handle = start(source, PERIOD);

        tokio::time::sleep(Duration::from_millis(10)).await;
        let before = handle.snapshot().seq;

        let snapshot = handle.trigger_and_wait().await.unwrap();
        assert!(snapshot.seq > before);
        assert!(snapshot.response.success);
    }

    #[tokio::test]
    async fn should_serve_placeholder_before_first_completion() {
        let (source, _calls) = ScriptedSource::with_script(vec![(Duration::from_secs(60), 1)]);
        let handle = start(source, PERIOD);

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.seq, 0);
        assert!(!snapshot.response.success);
        assert_eq!(snapshot.response.message.as_deref(), Some(PENDING_MESSAGE));
    }

    #[test]
    fn should_format_status_line_with_count_and_time() {
        let snapshot = Snapshot {
            seq: 3,
            response: DiagramResponse::cards("<div/>".to_string(), 5),
            refreshed_at: chrono::Utc.with_ymd_and_hms(2026, 1, 2, 14, 3, 22).unwrap(),
        };
        let status = snapshot.status_line();
        assert!(status.contains("5 automations"));
        assert!(status.contains("14:03:22"));
    }

    #[test]
    fn should_show_error_status_for_failed_snapshot() {
        let snapshot = Snapshot {
            seq: 1,
            response: DiagramResponse::failure("X"),
            refreshed_at: time::now(),
        };
        assert_eq!(snapshot.status_line(), STATUS_ERROR);
    }
}
