//! Engine constants and default configuration values.

/// Multipliers with an absolute value at or below this are treated as zero.
pub const ZERO_MULTIPLIER_EPSILON: f32 = 0.0001;

/// Prefix of the permission key that unlocks a paycheck tier.
pub const PERMISSION_PREFIX: &str = "paycheck.";

/// Default seconds between paychecks.
pub const DEFAULT_INTERVAL_SECS: f32 = 600.0;

/// Default distance a player must travel between payouts.
pub const DEFAULT_MINIMUM_MOVEMENT: f32 = 1.0;

/// Default paycheck tiers as `(name, experience)`.
pub const DEFAULT_PAYCHECKS: [(&str, u32); 14] = [
    ("pvt", 100),
    ("pfc", 150),
    ("cpl", 200),
    ("sgt", 250),
    ("ssgt", 300),
    ("1sgt", 350),
    ("msgt", 400),
    ("2lt", 500),
    ("1lt", 600),
    ("cpt", 700),
    ("maj", 1200),
    ("ltc", 1700),
    ("col", 2200),
    ("bg", 2700),
];

/// Default global zone: any location node named like " HQ" halves payouts within 270m.
pub const DEFAULT_ZONE_NODE: &str = " HQ";
pub const DEFAULT_ZONE_RADIUS: f32 = 270.0;
pub const DEFAULT_ZONE_MULTIPLIER: f32 = 0.5;

/// Default experience cap table as `(minimum_xp, modifier)`.
pub const DEFAULT_XP_CAPS: [(u32, f32); 5] = [
    (60_000, 0.9),
    (70_000, 0.75),
    (80_000, 0.60),
    (90_000, 0.25),
    (100_000, 0.0),
];
