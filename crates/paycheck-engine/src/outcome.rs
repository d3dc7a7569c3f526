//! Result of one player's paycheck evaluation.

use paycheck_core::traits::NoticeColor;

/// What happened to one player on one tick.
///
/// Denials are ordinary outcomes, not errors. The host maps each outcome to a
/// notice via [`message_key`](Self::message_key) and
/// [`message_args`](Self::message_args).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaycheckOutcome {
    /// The player holds no paycheck permission. Silent.
    NoPaycheck,
    DeniedDead,
    DeniedSafezone,
    /// The player has not moved far enough since the last payout.
    DeniedStationary,
    /// The experience cap modifier is zero. Carries the pre-multiplier tier sum.
    DeniedCap { experience: u32 },
    /// The zone multiplier is effectively zero.
    DeniedZeroMultiplier,
    Granted { experience: i32 },
    /// Granted after a cap modifier below 1.0 was applied.
    GrantedWithCap { experience: i32, cap_percent: f32 },
    /// A non-zero delta was requested but the host applied none of it.
    DeniedUnable { requested: i32 },
    /// The computed delta truncated to zero and nothing was applied. Silent.
    NoChange,
}

impl PaycheckOutcome {
    /// Translation key of the notice for this outcome, `None` when silent.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::NoPaycheck | Self::NoChange => None,
            Self::DeniedDead => Some("paycheck_dead"),
            Self::DeniedSafezone => Some("paycheck_safezone"),
            Self::DeniedStationary => Some("paycheck_stationary"),
            Self::DeniedCap { .. } => Some("paycheck_notgiven_cap"),
            Self::DeniedZeroMultiplier => Some("paycheck_zero_multiplier"),
            Self::Granted { .. } => Some("paycheck_given"),
            Self::GrantedWithCap { .. } => Some("paycheck_given_cap"),
            Self::DeniedUnable { .. } => Some("paycheck_notgiven"),
        }
    }

    /// Positional arguments substituted into the notice template.
    pub fn message_args(&self) -> Vec<String> {
        match self {
            Self::DeniedCap { experience } => vec![experience.to_string()],
            Self::Granted { experience } => vec![experience.to_string()],
            Self::GrantedWithCap {
                experience,
                cap_percent,
            } => vec![experience.to_string(), format_percent(*cap_percent)],
            Self::DeniedUnable { requested } => vec![requested.to_string()],
            _ => Vec::new(),
        }
    }

    pub fn color(&self) -> NoticeColor {
        if self.is_granted() {
            NoticeColor::Green
        } else {
            NoticeColor::Yellow
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. } | Self::GrantedWithCap { .. })
    }

    /// Experience actually applied to the player.
    pub fn granted_experience(&self) -> i32 {
        match self {
            Self::Granted { experience } | Self::GrantedWithCap { experience, .. } => *experience,
            _ => 0,
        }
    }

    /// Short stable name for logs and tallies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPaycheck => "no_paycheck",
            Self::DeniedDead => "denied_dead",
            Self::DeniedSafezone => "denied_safezone",
            Self::DeniedStationary => "denied_stationary",
            Self::DeniedCap { .. } => "denied_cap",
            Self::DeniedZeroMultiplier => "denied_zero_multiplier",
            Self::Granted { .. } => "granted",
            Self::GrantedWithCap { .. } => "granted_with_cap",
            Self::DeniedUnable { .. } => "denied_unable",
            Self::NoChange => "no_change",
        }
    }
}

/// Percentage rounded to one decimal, without a trailing `.0`.
fn format_percent(percent: f32) -> String {
    let rounded = (percent * 10.0).round() / 10.0;
    format!("{rounded}")
}
