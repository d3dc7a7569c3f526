//! Player-facing notice templates.
//!
//! Templates use positional `{0}`, `{1}` placeholders. Operators may override
//! any subset of keys with a flat JSON object; keys not present keep their
//! built-in text.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use paycheck_engine::PaycheckOutcome;
use tracing::debug;

use crate::error::StoreError;

pub const TIME_TO_NEXT_MINUTES: &str = "command_time_to_next_paycheck_minutes";
pub const TIME_TO_NEXT_SECONDS: &str = "command_time_to_next_paycheck";

const DEFAULTS: &[(&str, &str)] = &[
    ("paycheck_given", "You have received your paycheck of {0} experience!"),
    (
        "paycheck_given_cap",
        "You have received your paycheck of {0} experience! Modified by {1}% because you have too much experience",
    ),
    ("paycheck_notgiven", "Your paycheck was {0}, but you were unable to receive it!"),
    (
        "paycheck_notgiven_cap",
        "Your paycheck was {0}, but you were unable to receive it because you have too much experience! Spend some!",
    ),
    ("paycheck_dead", "You cannot receive paychecks while dead!"),
    ("paycheck_safezone", "You cannot receive paychecks in a safezone!"),
    (
        "paycheck_stationary",
        "You cannot receive paychecks if you haven't moved from where you were at the last payout!",
    ),
    ("paycheck_zero_multiplier", "You cannot earn experience in this area!"),
    (
        TIME_TO_NEXT_MINUTES,
        "You will receive your next paycheck in {0} minutes, {1} seconds!",
    ),
    (TIME_TO_NEXT_SECONDS, "You will receive your next paycheck in {0} seconds!"),
];

/// Key to template lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Translations {
    table: HashMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            table: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Translations {
    /// Defaults with `overrides` layered on top.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut translations = Self::default();
        translations.table.extend(overrides);
        translations
    }

    /// Load overrides from a JSON object at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!("no translations at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw)?;
        debug!("loaded {} translation overrides", overrides.len());
        Ok(Self::with_overrides(overrides))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// Render `key` with positional `args`. Unknown keys render as the key itself.
    pub fn render(&self, key: &str, args: &[String]) -> String {
        let Some(template) = self.get(key) else {
            return key.to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.to_string(), |text, (i, arg)| {
                text.replace(&format!("{{{i}}}"), arg)
            })
    }

    /// Notice text for `outcome`, or `None` for silent outcomes.
    pub fn outcome_message(&self, outcome: &PaycheckOutcome) -> Option<String> {
        let key = outcome.message_key()?;
        Some(self.render(key, &outcome.message_args()))
    }

    /// "Time to next paycheck" text for the remaining `wait`.
    pub fn time_to_next(&self, wait: Duration) -> String {
        let total = wait.as_secs();
        let (minutes, seconds) = (total / 60, total % 60);
        if minutes > 0 {
            self.render(
                TIME_TO_NEXT_MINUTES,
                &[minutes.to_string(), seconds.to_string()],
            )
        } else {
            self.render(TIME_TO_NEXT_SECONDS, &[seconds.to_string()])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_loud_outcome_has_a_default_template() {
        let t = Translations::default();
        let outcomes = [
            PaycheckOutcome::DeniedDead,
            PaycheckOutcome::DeniedSafezone,
            PaycheckOutcome::DeniedStationary,
            PaycheckOutcome::DeniedCap { experience: 1 },
            PaycheckOutcome::DeniedZeroMultiplier,
            PaycheckOutcome::Granted { experience: 1 },
            PaycheckOutcome::GrantedWithCap {
                experience: 1,
                cap_percent: 50.0,
            },
            PaycheckOutcome::DeniedUnable { requested: 1 },
        ];
        for outcome in outcomes {
            let key = outcome.message_key().unwrap();
            assert!(t.get(key).is_some(), "missing template for {key}");
        }
    }

    #[test]
    fn renders_positional_args() {
        let t = Translations::default();
        let outcome = PaycheckOutcome::GrantedWithCap {
            experience: 50,
            cap_percent: 50.0,
        };
        assert_eq!(
            t.outcome_message(&outcome).unwrap(),
            "You have received your paycheck of 50 experience! Modified by 50% because you have too much experience"
        );
    }

    #[test]
    fn silent_outcome_has_no_message() {
        let t = Translations::default();
        assert_eq!(t.outcome_message(&PaycheckOutcome::NoPaycheck), None);
        assert_eq!(t.outcome_message(&PaycheckOutcome::NoChange), None);
    }

    #[test]
    fn unknown_key_renders_as_key() {
        assert_eq!(Translations::default().render("nope", &[]), "nope");
    }

    #[test]
    fn overrides_replace_only_named_keys() {
        let t = Translations::with_overrides(HashMap::from([(
            "paycheck_given".to_string(),
            "+{0} xp".to_string(),
        )]));
        assert_eq!(
            t.outcome_message(&PaycheckOutcome::Granted { experience: 7 }).unwrap(),
            "+7 xp"
        );
        assert_eq!(
            t.get("paycheck_dead"),
            Some("You cannot receive paychecks while dead!")
        );
    }

    #[test]
    fn time_to_next_switches_on_minutes() {
        let t = Translations::default();
        assert_eq!(
            t.time_to_next(Duration::from_secs(125)),
            "You will receive your next paycheck in 2 minutes, 5 seconds!"
        );
        assert_eq!(
            t.time_to_next(Duration::from_millis(42_900)),
            "You will receive your next paycheck in 42 seconds!"
        );
    }

    #[test]
    fn seconds_only_notice_uses_plain_key() {
        let t = Translations::with_overrides(HashMap::from([(
            "command_time_to_next_paycheck".to_string(),
            "Next paycheck in {0}s".to_string(),
        )]));
        assert_eq!(t.time_to_next(Duration::from_secs(9)), "Next paycheck in 9s");
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let t = Translations::load(&dir.path().join("translations.json")).unwrap();
        assert_eq!(t, Translations::default());
    }

    #[test]
    fn load_merges_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        fs::write(&path, r#"{ "paycheck_safezone": "Not here." }"#).unwrap();
        let t = Translations::load(&path).unwrap();
        assert_eq!(t.get("paycheck_safezone"), Some("Not here."));
        assert_eq!(
            t.get("paycheck_given"),
            Some("You have received your paycheck of {0} experience!")
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            Translations::load(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
