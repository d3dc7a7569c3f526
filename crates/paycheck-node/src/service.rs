//! Paycheck sweeps over a live host.
//!
//! A sweep takes one config snapshot, evaluates every connected player
//! against it, sends notices, and returns a tally. Edits made mid-sweep take
//! effect on the next sweep.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use paycheck_core::traits::GameHost;
use paycheck_core::types::{EngineConfig, PlayerId, Vec3};
use paycheck_engine::{PaycheckEngine, PaycheckOutcome};
use tracing::{info, warn};

use crate::store::ConfigStore;
use crate::translations::Translations;

/// Summary of one sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Players evaluated.
    pub players: usize,
    /// Sum of experience actually applied.
    pub granted_experience: i64,
    /// Outcome label to count.
    pub outcomes: BTreeMap<&'static str, usize>,
    /// The host was not ready and nobody was evaluated.
    pub skipped: bool,
}

impl SweepReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &PaycheckOutcome) {
        self.players += 1;
        self.granted_experience += i64::from(outcome.granted_experience());
        *self.outcomes.entry(outcome.label()).or_default() += 1;
    }

    /// How many players ended with the outcome labelled `label`.
    pub fn count(&self, label: &str) -> usize {
        self.outcomes.get(label).copied().unwrap_or(0)
    }
}

/// Pays players on behalf of a [`GameHost`].
pub struct PayrollService<H: GameHost> {
    host: Arc<H>,
    store: Arc<ConfigStore>,
    engine: Mutex<PaycheckEngine>,
    translations: RwLock<Translations>,
}

impl<H: GameHost> PayrollService<H> {
    pub fn new(host: Arc<H>, store: Arc<ConfigStore>, translations: Translations) -> Self {
        Self {
            host,
            store,
            engine: Mutex::new(PaycheckEngine::new()),
            translations: RwLock::new(translations),
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn translations(&self) -> Translations {
        self.translations.read().clone()
    }

    pub fn set_translations(&self, translations: Translations) {
        *self.translations.write() = translations;
    }

    /// Evaluate every connected player once.
    pub fn give_all_paychecks(&self) -> SweepReport {
        if !self.host.is_ready() {
            warn!("host not ready, skipping paycheck sweep");
            return SweepReport::skipped();
        }

        let config = self.store.snapshot();
        let players = self.host.connected_players();
        let mut report = SweepReport::default();
        {
            let mut engine = self.engine.lock();
            for player in &players {
                let outcome = engine.evaluate(&config, self.host.as_ref(), player);
                self.announce(&config, player, &outcome);
                report.record(&outcome);
            }
        }

        info!(
            players = report.players,
            granted = report.granted_experience,
            "paycheck sweep complete"
        );
        report
    }

    /// Evaluate a single player against the current config.
    pub fn give_paycheck(&self, player: &H::Player) -> PaycheckOutcome {
        let config = self.store.snapshot();
        let outcome = self
            .engine
            .lock()
            .evaluate(&config, self.host.as_ref(), player);
        self.announce(&config, player, &outcome);
        outcome
    }

    pub fn last_paid_position(&self, player: PlayerId) -> Option<Vec3> {
        self.engine.lock().last_paid_position(player)
    }

    fn announce(&self, config: &EngineConfig, player: &H::Player, outcome: &PaycheckOutcome) {
        if !config.display_notification {
            return;
        }
        if let Some(message) = self.translations.read().outcome_message(outcome) {
            self.host.notify(player, &message, outcome.color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paycheck_core::traits::{NodeRegistry, NoticeColor, Player};
    use paycheck_core::types::{PaycheckTier, StaticNodeRegistry};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Clone)]
    struct Soldier {
        id: PlayerId,
        rank: Option<&'static str>,
        dead: bool,
    }

    impl Player for Soldier {
        fn id(&self) -> PlayerId {
            self.id
        }
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn experience(&self) -> u32 {
            0
        }
        fn is_dead(&self) -> bool {
            self.dead
        }
        fn in_safe_zone(&self) -> bool {
            false
        }
        fn has_permission(&self, key: &str) -> bool {
            self.rank.is_some_and(|rank| key == format!("paycheck.{rank}"))
        }
    }

    struct Server {
        ready: AtomicBool,
        players: Vec<Soldier>,
        nodes: StaticNodeRegistry,
        notices: Mutex<Vec<(PlayerId, String, NoticeColor)>>,
    }

    impl Server {
        fn new(players: Vec<Soldier>) -> Self {
            Self {
                ready: AtomicBool::new(true),
                players,
                nodes: StaticNodeRegistry::default(),
                notices: Mutex::new(Vec::new()),
            }
        }
    }

    impl GameHost for Server {
        type Player = Soldier;

        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }
        fn connected_players(&self) -> Vec<Soldier> {
            self.players.clone()
        }
        fn nodes(&self) -> &dyn NodeRegistry {
            &self.nodes
        }
        fn apply_experience_delta(&self, _player: &Soldier, delta: i32) -> i32 {
            delta
        }
        fn notify(&self, player: &Soldier, message: &str, color: NoticeColor) {
            self.notices.lock().push((player.id, message.to_string(), color));
        }
    }

    fn soldier(id: u64, rank: Option<&'static str>) -> Soldier {
        Soldier {
            id: PlayerId(id),
            rank,
            dead: false,
        }
    }

    fn service(players: Vec<Soldier>, cfg: EngineConfig) -> PayrollService<Server> {
        let store = ConfigStore::in_memory(cfg).unwrap();
        PayrollService::new(
            Arc::new(Server::new(players)),
            Arc::new(store),
            Translations::default(),
        )
    }

    fn config() -> EngineConfig {
        EngineConfig {
            allow_paychecks_when_dead: false,
            paychecks: vec![PaycheckTier::new("pvt", 100), PaycheckTier::new("sgt", 300)],
            ..EngineConfig::empty()
        }
    }

    #[test]
    fn sweep_tallies_outcomes() {
        let mut dead = soldier(3, Some("sgt"));
        dead.dead = true;
        let svc = service(
            vec![soldier(1, Some("pvt")), soldier(2, None), dead],
            config(),
        );

        let report = svc.give_all_paychecks();
        assert!(!report.skipped);
        assert_eq!(report.players, 3);
        assert_eq!(report.granted_experience, 100);
        assert_eq!(report.count("granted"), 1);
        assert_eq!(report.count("no_paycheck"), 1);
        assert_eq!(report.count("denied_dead"), 1);
    }

    #[test]
    fn sweep_notifies_loud_outcomes_only() {
        let mut dead = soldier(3, Some("sgt"));
        dead.dead = true;
        let svc = service(
            vec![soldier(1, Some("pvt")), soldier(2, None), dead],
            config(),
        );
        svc.give_all_paychecks();

        let notices = svc.host().notices.lock().clone();
        assert_eq!(
            notices,
            vec![
                (
                    PlayerId(1),
                    "You have received your paycheck of 100 experience!".to_string(),
                    NoticeColor::Green
                ),
                (
                    PlayerId(3),
                    "You cannot receive paychecks while dead!".to_string(),
                    NoticeColor::Yellow
                ),
            ]
        );
    }

    #[test]
    fn notifications_can_be_disabled() {
        let svc = service(
            vec![soldier(1, Some("pvt"))],
            EngineConfig {
                display_notification: false,
                ..config()
            },
        );
        assert_eq!(svc.give_all_paychecks().granted_experience, 100);
        assert!(svc.host().notices.lock().is_empty());
    }

    #[test]
    fn sweep_is_skipped_when_host_not_ready() {
        let svc = service(vec![soldier(1, Some("pvt"))], config());
        svc.host().ready.store(false, Ordering::SeqCst);
        let report = svc.give_all_paychecks();
        assert!(report.skipped);
        assert_eq!(report.players, 0);
        assert!(svc.host().notices.lock().is_empty());
    }

    #[test]
    fn edits_apply_on_next_paycheck() {
        let svc = service(vec![], config());
        let player = soldier(1, Some("pvt"));
        assert_eq!(
            svc.give_paycheck(&player),
            PaycheckOutcome::Granted { experience: 100 }
        );

        svc.store()
            .edit(|cfg| {
                if let Some(tier) = cfg.paycheck_mut("pvt") {
                    tier.experience = 150;
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(
            svc.give_paycheck(&player),
            PaycheckOutcome::Granted { experience: 150 }
        );
    }

    #[test]
    fn translations_can_be_swapped() {
        let svc = service(vec![soldier(1, Some("pvt"))], config());
        svc.set_translations(Translations::with_overrides(
            [("paycheck_given".to_string(), "+{0}".to_string())].into(),
        ));
        svc.give_all_paychecks();
        assert_eq!(svc.host().notices.lock()[0].1, "+100");
    }
}
