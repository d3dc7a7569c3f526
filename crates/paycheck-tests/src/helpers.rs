//! Shared test helpers for integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use paycheck_core::traits::{GameHost, NodeRegistry, NoticeColor, Player};
use paycheck_core::types::{EngineConfig, LocationNode, PlayerId, StaticNodeRegistry, Vec3};
use paycheck_node::{ConfigStore, PayrollService, Translations};

/// A connected player with fixed state.
#[derive(Debug, Clone)]
pub struct MockPlayer {
    pub id: PlayerId,
    pub position: Vec3,
    pub experience: u32,
    pub dead: bool,
    pub safe: bool,
    pub permissions: HashSet<String>,
}

impl MockPlayer {
    /// Player `id` at the origin holding `paycheck.<tier>` for each tier.
    pub fn new(id: u64, tiers: &[&str]) -> Self {
        Self {
            id: PlayerId(id),
            position: Vec3::ZERO,
            experience: 0,
            dead: false,
            safe: false,
            permissions: tiers
                .iter()
                .map(|t| format!("paycheck.{}", t.to_lowercase()))
                .collect(),
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    pub fn dead(mut self) -> Self {
        self.dead = true;
        self
    }

    pub fn in_safezone(mut self) -> Self {
        self.safe = true;
        self
    }
}

impl Player for MockPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn experience(&self) -> u32 {
        self.experience
    }
    fn is_dead(&self) -> bool {
        self.dead
    }
    fn in_safe_zone(&self) -> bool {
        self.safe
    }
    fn has_permission(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }
}

/// Notice captured by [`MockHost::notify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub player: PlayerId,
    pub message: String,
    pub color: NoticeColor,
}

/// In-memory game host that records every delta and notice.
#[derive(Default)]
pub struct MockHost {
    pub players: Mutex<Vec<MockPlayer>>,
    pub nodes: StaticNodeRegistry,
    /// Largest delta the host will apply; `None` applies everything.
    pub clamp: Option<i32>,
    pub not_ready: bool,
    pub deltas: Mutex<Vec<(PlayerId, i32)>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl MockHost {
    pub fn with_players(players: Vec<MockPlayer>) -> Self {
        Self {
            players: Mutex::new(players),
            ..Self::default()
        }
    }

    pub fn with_node(mut self, name: &str, position: Vec3) -> Self {
        self.nodes.push(LocationNode::new(name, position));
        self
    }

    pub fn deltas(&self) -> Vec<(PlayerId, i32)> {
        self.deltas.lock().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Replace the stored state of player `id`.
    pub fn update_player(&self, id: u64, f: impl FnOnce(&mut MockPlayer)) {
        if let Some(player) = self.players.lock().iter_mut().find(|p| p.id == PlayerId(id)) {
            f(player);
        }
    }
}

impl GameHost for MockHost {
    type Player = MockPlayer;

    fn is_ready(&self) -> bool {
        !self.not_ready
    }

    fn connected_players(&self) -> Vec<MockPlayer> {
        self.players.lock().clone()
    }

    fn nodes(&self) -> &dyn NodeRegistry {
        &self.nodes
    }

    fn apply_experience_delta(&self, player: &MockPlayer, delta: i32) -> i32 {
        self.deltas.lock().push((player.id, delta));
        match self.clamp {
            Some(max) => delta.min(max),
            None => delta,
        }
    }

    fn notify(&self, player: &MockPlayer, message: &str, color: NoticeColor) {
        self.notices.lock().push(Notice {
            player: player.id,
            message: message.to_string(),
            color,
        });
    }
}

/// Payroll service over `host` with an in-memory store holding `cfg`.
pub fn payroll(host: MockHost, cfg: EngineConfig) -> PayrollService<MockHost> {
    let store = ConfigStore::in_memory(cfg).unwrap();
    PayrollService::new(Arc::new(host), Arc::new(store), Translations::default())
}
