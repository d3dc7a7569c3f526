//! Periodic paycheck sweeps.
//!
//! The scheduler owns one tokio task. Each cycle re-reads the interval from
//! the current config snapshot, so an interval edit takes effect after the
//! pending sleep. Stopping is explicit: a `watch` channel wakes the task and
//! [`PaycheckScheduler::stop`] waits for it to exit, so a restart never leaves
//! two loops running.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use paycheck_core::traits::GameHost;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::service::PayrollService;

/// Stand-in deadline for intervals too large to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Handle to a running sweep loop.
pub struct PaycheckScheduler<H: GameHost + 'static> {
    service: Arc<PayrollService<H>>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
    next_due: Arc<Mutex<Option<Instant>>>,
}

impl<H: GameHost + 'static> PaycheckScheduler<H> {
    /// Spawn the sweep loop on the current tokio runtime.
    ///
    /// The first sweep happens one interval from now.
    pub fn start(service: Arc<PayrollService<H>>) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let next_due = Arc::new(Mutex::new(None));
        let task = tokio::spawn(run(Arc::clone(&service), stop_rx, Arc::clone(&next_due)));
        info!("paycheck scheduler started");
        Self {
            service,
            stop_tx,
            task,
            next_due,
        }
    }

    pub fn service(&self) -> &Arc<PayrollService<H>> {
        &self.service
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Time left before the next sweep, `None` when stopped.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_due
            .lock()
            .map(|due| due.saturating_duration_since(Instant::now()))
    }

    /// Rendered "time to next paycheck" notice.
    pub fn time_until_next_message(&self) -> Option<String> {
        let wait = self.time_until_next()?;
        Some(self.service.translations().time_to_next(wait))
    }

    /// Signal the loop and wait for it to exit. A sweep in progress finishes first.
    pub async fn stop(self) -> Arc<PayrollService<H>> {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("paycheck scheduler task failed: {e}");
        }
        info!("paycheck scheduler stopped");
        self.service
    }

    /// Stop the current loop and start a fresh one with a full interval.
    pub async fn restart(self) -> Self {
        let service = self.stop().await;
        Self::start(service)
    }
}

async fn run<H: GameHost + 'static>(
    service: Arc<PayrollService<H>>,
    mut stop_rx: watch::Receiver<bool>,
    next_due: Arc<Mutex<Option<Instant>>>,
) {
    loop {
        let interval = service.store().snapshot().interval();
        let now = Instant::now();
        let due = now.checked_add(interval).unwrap_or(now + FAR_FUTURE);
        *next_due.lock() = Some(due);

        tokio::select! {
            _ = sleep_until(due) => {}
            // Fires on a stop signal or when the handle is dropped.
            _ = stop_rx.changed() => break,
        }

        let report = service.give_all_paychecks();
        debug!(
            players = report.players,
            skipped = report.skipped,
            "scheduled sweep finished"
        );
    }
    *next_due.lock() = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfigStore;
    use crate::translations::Translations;
    use paycheck_core::traits::{NodeRegistry, NoticeColor, Player};
    use paycheck_core::types::{EngineConfig, PaycheckTier, PlayerId, StaticNodeRegistry, Vec3};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recruit;

    impl Player for Recruit {
        fn id(&self) -> PlayerId {
            PlayerId(7)
        }
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn experience(&self) -> u32 {
            0
        }
        fn is_dead(&self) -> bool {
            false
        }
        fn in_safe_zone(&self) -> bool {
            false
        }
        fn has_permission(&self, key: &str) -> bool {
            key == "paycheck.pvt"
        }
    }

    #[derive(Default)]
    struct CountingHost {
        nodes: StaticNodeRegistry,
        granted: AtomicUsize,
    }

    impl GameHost for CountingHost {
        type Player = Recruit;

        fn connected_players(&self) -> Vec<Recruit> {
            vec![Recruit]
        }
        fn nodes(&self) -> &dyn NodeRegistry {
            &self.nodes
        }
        fn apply_experience_delta(&self, _player: &Recruit, delta: i32) -> i32 {
            self.granted.fetch_add(1, Ordering::SeqCst);
            delta
        }
        fn notify(&self, _player: &Recruit, _message: &str, _color: NoticeColor) {}
    }

    fn service(interval_secs: f32) -> Arc<PayrollService<CountingHost>> {
        let cfg = EngineConfig {
            interval_secs,
            paychecks: vec![PaycheckTier::new("pvt", 100)],
            ..EngineConfig::empty()
        };
        Arc::new(PayrollService::new(
            Arc::new(CountingHost::default()),
            Arc::new(ConfigStore::in_memory(cfg).unwrap()),
            Translations::default(),
        ))
    }

    fn sweeps(service: &PayrollService<CountingHost>) -> usize {
        service.host().granted.load(Ordering::SeqCst)
    }

    /// Wait for the spawned loop to record its first due time.
    async fn first_wait(scheduler: &PaycheckScheduler<CountingHost>) -> Duration {
        for _ in 0..100 {
            if let Some(wait) = scheduler.time_until_next() {
                return wait;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("scheduler never armed");
    }

    #[tokio::test]
    async fn sweeps_repeat_until_stopped() {
        let scheduler = PaycheckScheduler::start(service(0.02));
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(scheduler.is_running());

        let service = scheduler.stop().await;
        let after_stop = sweeps(&service);
        assert!(after_stop >= 2, "expected repeated sweeps, got {after_stop}");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(sweeps(&service), after_stop);
    }

    #[tokio::test]
    async fn stop_before_first_sweep_pays_nobody() {
        let scheduler = PaycheckScheduler::start(service(60.0));
        let wait = first_wait(&scheduler).await;
        assert!(wait <= Duration::from_secs(60));
        assert!(wait > Duration::from_secs(58));

        let service = scheduler.stop().await;
        assert_eq!(sweeps(&service), 0);
    }

    #[tokio::test]
    async fn time_until_next_message_uses_translations() {
        let scheduler = PaycheckScheduler::start(service(600.0));
        first_wait(&scheduler).await;
        let message = scheduler.time_until_next_message().unwrap();
        assert!(message.contains(" minutes, "), "{message}");
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn restart_resets_the_countdown() {
        let scheduler = PaycheckScheduler::start(service(60.0));
        scheduler
            .service()
            .store()
            .edit(|cfg| {
                cfg.interval_secs = 5.0;
                Ok(())
            })
            .unwrap();

        let scheduler = scheduler.restart().await;
        let wait = first_wait(&scheduler).await;
        assert!(wait <= Duration::from_secs(5), "{wait:?}");
        scheduler.stop().await;
    }
}
