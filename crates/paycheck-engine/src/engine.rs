//! Per-player paycheck orchestration.
//!
//! [`PaycheckEngine::evaluate`] walks the gates in a fixed order and stops at
//! the first one that withholds the paycheck:
//!
//! 1. tier selection (no tier: silent no-op)
//! 2. death
//! 3. safe zone
//! 4. minimum movement
//! 5. experience cap (fully capped: denied, reporting the tier sum)
//! 6. zone multiplier (effectively zero: denied)
//! 7. apply `trunc(sum * multiplier * cap)` through the host

use paycheck_core::constants::ZERO_MULTIPLIER_EPSILON;
use paycheck_core::traits::{GameHost, Player};
use paycheck_core::types::{EngineConfig, PlayerId, Vec3};
use tracing::debug;

use crate::cap::cap_modifier;
use crate::movement::MovementGate;
use crate::outcome::PaycheckOutcome;
use crate::selector::{experience_sum, select_paychecks};
use crate::zone::zone_multiplier;

/// Stateful paycheck evaluator.
///
/// The only state is the movement gate's last-paid positions, owned
/// exclusively by the engine. Configuration is passed in per call so the
/// host can swap snapshots between ticks.
#[derive(Debug, Default)]
pub struct PaycheckEngine {
    movement: MovementGate,
}

impl PaycheckEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one player against `config` and apply any experience through `host`.
    pub fn evaluate<H: GameHost>(
        &mut self,
        config: &EngineConfig,
        host: &H,
        player: &H::Player,
    ) -> PaycheckOutcome {
        let id = player.id();
        let outcome = self.resolve(config, host, player);
        debug!(player = %id, outcome = outcome.label(), "paycheck evaluated");
        outcome
    }

    fn resolve<H: GameHost>(
        &mut self,
        config: &EngineConfig,
        host: &H,
        player: &H::Player,
    ) -> PaycheckOutcome {
        let paychecks = select_paychecks(
            &config.paychecks,
            config.allow_multiple_paychecks,
            |key| player.has_permission(key),
        );
        if paychecks.is_empty() {
            return PaycheckOutcome::NoPaycheck;
        }

        if !config.allow_paychecks_when_dead && player.is_dead() {
            return PaycheckOutcome::DeniedDead;
        }
        if !config.allow_paychecks_in_safezone && player.in_safe_zone() {
            return PaycheckOutcome::DeniedSafezone;
        }

        let position = player.position();
        if !self.movement.check(
            player.id(),
            position,
            config.minimum_movement_between_paychecks,
        ) {
            return PaycheckOutcome::DeniedStationary;
        }

        let experience = experience_sum(&paychecks);

        let cap = cap_modifier(player.experience(), &config.xp_caps);
        if cap == 0.0 {
            return PaycheckOutcome::DeniedCap { experience };
        }

        let zones = config
            .zones
            .iter()
            .chain(paychecks.iter().flat_map(|tier| tier.zones.iter()));
        let multiplier = zone_multiplier(
            position,
            zones,
            config.allow_multiple_multipliers,
            host.nodes(),
        );
        if multiplier.abs() <= ZERO_MULTIPLIER_EPSILON {
            return PaycheckOutcome::DeniedZeroMultiplier;
        }

        // `as` truncates toward zero and saturates at the i32 bounds.
        let change = (experience as f32 * multiplier * cap) as i32;
        let given = host.apply_experience_delta(player, change);

        if given != 0 {
            if cap < 1.0 {
                PaycheckOutcome::GrantedWithCap {
                    experience: given,
                    cap_percent: cap * 100.0,
                }
            } else {
                PaycheckOutcome::Granted { experience: given }
            }
        } else if change != 0 {
            PaycheckOutcome::DeniedUnable { requested: change }
        } else {
            PaycheckOutcome::NoChange
        }
    }

    /// Where `player` was standing at their last movement-gated payout.
    pub fn last_paid_position(&self, player: PlayerId) -> Option<Vec3> {
        self.movement.last_position(player)
    }

    /// Number of players with a recorded payout position.
    pub fn tracked_players(&self) -> usize {
        self.movement.tracked()
    }
}
