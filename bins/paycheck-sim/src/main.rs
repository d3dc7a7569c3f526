//! Paycheck simulator.
//!
//! Runs the paycheck scheduler against an in-process game host with a
//! handful of wandering players. Useful for trying out a config file and
//! translation overrides without a game server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use paycheck_core::constants::DEFAULT_PAYCHECKS;
use paycheck_core::traits::{GameHost, NodeRegistry, NoticeColor, Player};
use paycheck_core::types::{LocationNode, PlayerId, StaticNodeRegistry, Vec3};
use paycheck_node::{ConfigStore, PaycheckScheduler, PayrollService, RuntimeConfig, Translations};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};


#[derive(Parser, Debug)]
#[command(
    name = "paycheck-sim",
    version,
    about = "Run experience paychecks against simulated players"
)]
struct Args {
    /// Directory holding paycheck.json and translations.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of simulated players
    #[arg(long, default_value_t = 8)]
    players: u64,

    /// Override the configured paycheck interval, in seconds
    #[arg(long)]
    interval: Option<f32>,

    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration: Option<u64>,

    /// Experience a player can hold before the host refuses more
    #[arg(long, default_value_t = 100_000)]
    xp_ceiling: u32,

    /// Seed for player movement
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,
}

// ---------------------------------------------------------------------------
// Simulated host
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SimPlayer {
    id: PlayerId,
    position: Vec3,
    experience: u32,
    dead: bool,
    rank: &'static str,
}

impl Player for SimPlayer {
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

    // Main bases double as safe zones.
    fn in_safe_zone(&self) -> bool {
        self.position.x.abs() < 20.0 && self.position.z.abs() < 20.0
    }

    fn has_permission(&self, key: &str) -> bool {
        key.strip_prefix("paycheck.") == Some(self.rank)
    }
}

struct SimHost {
    players: Mutex<Vec<SimPlayer>>,
    nodes: StaticNodeRegistry,
    rng: Mutex<StdRng>,
    xp_ceiling: u32,
}

impl SimHost {
    fn new(count: u64, xp_ceiling: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let players = (1..=count)
            .map(|id| SimPlayer {
                id: PlayerId(id),
                position: Vec3::new(
                    rng.gen_range(-1_000.0..1_000.0),
                    0.0,
                    rng.gen_range(-1_000.0..1_000.0),
                ),
                experience: rng.gen_range(0..xp_ceiling.max(1)),
                dead: false,
                rank: DEFAULT_PAYCHECKS[rng.gen_range(0..DEFAULT_PAYCHECKS.len())].0,
            })
            .collect();

        let nodes = StaticNodeRegistry::new(vec![
            LocationNode::new("US HQ", Vec3::new(-800.0, 0.0, -800.0)),
            LocationNode::new("RU HQ", Vec3::new(800.0, 0.0, 800.0)),
            LocationNode::new("Airfield", Vec3::new(0.0, 0.0, 400.0)),
        ]);

        Self {
            players: Mutex::new(players),
            nodes,
            rng: Mutex::new(rng),
            xp_ceiling,
        }
    }

    /// Move every player a little and occasionally kill or revive one.
    fn wander(&self) {
        let mut rng = self.rng.lock();
        for player in self.players.lock().iter_mut() {
            player.position.x += rng.gen_range(-25.0..25.0);
            player.position.z += rng.gen_range(-25.0..25.0);
            if rng.gen_bool(0.05) {
                player.dead = !player.dead;
            }
        }
    }
}

impl GameHost for SimHost {
    type Player = SimPlayer;

    fn connected_players(&self) -> Vec<SimPlayer> {
        self.players.lock().clone()
    }

    fn nodes(&self) -> &dyn NodeRegistry {
        &self.nodes
    }

    fn apply_experience_delta(&self, player: &SimPlayer, delta: i32) -> i32 {
        let mut players = self.players.lock();
        let Some(entry) = players.iter_mut().find(|p| p.id == player.id) else {
            return 0;
        };
        let target = (i64::from(entry.experience) + i64::from(delta))
            .clamp(0, i64::from(self.xp_ceiling));
        let applied = target - i64::from(entry.experience);
        entry.experience = u32::try_from(target).unwrap_or(self.xp_ceiling);
        i32::try_from(applied).unwrap_or(0)
    }

    fn notify(&self, player: &SimPlayer, message: &str, color: NoticeColor) {
        info!(player = %player.id, ?color, "{message}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, &args.log_format);

    let mut runtime = RuntimeConfig {
        log_level: args.log_level.clone(),
        ..RuntimeConfig::default()
    };
    if let Some(dir) = args.data_dir {
        runtime.data_dir = dir;
    }

    info!("paycheck-sim v{}", env!("CARGO_PKG_VERSION"));
    info!("data_dir: {:?}", runtime.data_dir);

    let store = ConfigStore::open(runtime.config_path()).context("failed to open paycheck config")?;
    if let Some(interval) = args.interval {
        let mut cfg = (*store.snapshot()).clone();
        cfg.interval_secs = interval;
        store.replace(cfg).context("invalid --interval")?;
    }
    let translations =
        Translations::load(&runtime.translations_path()).context("failed to load translations")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, players = args.players, "spawning simulated players");
    let host = Arc::new(SimHost::new(args.players, args.xp_ceiling, seed));

    let service = Arc::new(PayrollService::new(
        Arc::clone(&host),
        Arc::new(store),
        translations,
    ));
    let scheduler = PaycheckScheduler::start(Arc::clone(&service));
    if let Some(wait) = scheduler.time_until_next_message() {
        info!("{wait}");
    }

    let wander = {
        let host = Arc::clone(&host);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            loop {
                ticker.tick().await;
                host.wander();
            }
        })
    };

    let duration = args.duration;
    let deadline = async move {
        match duration {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending().await,
        }
    };

    info!("simulation running (Ctrl+C to stop)");
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res.context("failed to install Ctrl+C handler")?;
            info!("received Ctrl+C, shutting down...");
        }
        _ = deadline => {
            info!("simulation time elapsed");
        }
    }

    wander.abort();
    let service = scheduler.stop().await;

    match service.store().flush_if_dirty() {
        Ok(true) => info!("saved config changes"),
        Ok(false) => {}
        Err(e) => warn!("failed to save config: {e}"),
    }

    for player in host.connected_players() {
        info!(
            player = %player.id,
            rank = player.rank,
            experience = player.experience,
            "final balance"
        );
    }
    info!("paycheck-sim shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
