//! Paycheck tier selection.

use paycheck_core::types::PaycheckTier;

/// Tiers the caller is entitled to this tick.
///
/// A tier is eligible when `has_permission` accepts its
/// [`permission`](PaycheckTier::permission) key. With `allow_multiple` (or at
/// most one eligible tier) every eligible tier is returned in catalog order.
/// Otherwise only the tier with the strictly greatest experience is returned;
/// on ties the earliest one wins.
pub fn select_paychecks<'a, F>(
    tiers: &'a [PaycheckTier],
    allow_multiple: bool,
    has_permission: F,
) -> Vec<&'a PaycheckTier>
where
    F: Fn(&str) -> bool,
{
    let eligible: Vec<&PaycheckTier> = tiers
        .iter()
        .filter(|tier| has_permission(&tier.permission()))
        .collect();

    if allow_multiple || eligible.len() <= 1 {
        return eligible;
    }

    let mut highest = eligible[0];
    for &tier in &eligible[1..] {
        if tier.experience > highest.experience {
            highest = tier;
        }
    }
    vec![highest]
}

/// Total experience across `tiers`, saturating at `u32::MAX`.
pub fn experience_sum(tiers: &[&PaycheckTier]) -> u32 {
    tiers
        .iter()
        .fold(0u32, |sum, tier| sum.saturating_add(tier.experience))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn tiers() -> Vec<PaycheckTier> {
        vec![
            PaycheckTier::new("A", 100),
            PaycheckTier::new("B", 250),
            PaycheckTier::new("C", 250),
        ]
    }

    fn grants(keys: &[&str]) -> impl Fn(&str) -> bool {
        let set: HashSet<String> = keys.iter().map(|k| k.to_string()).collect();
        move |key| set.contains(key)
    }

    #[test]
    fn nothing_granted_selects_nothing() {
        let tiers = tiers();
        assert!(select_paychecks(&tiers, false, |_| false).is_empty());
        assert!(select_paychecks(&tiers, true, |_| false).is_empty());
    }

    #[test]
    fn first_maximum_wins_on_tie() {
        let tiers = tiers();
        let selected = select_paychecks(&tiers, false, grants(&["paycheck.b", "paycheck.c"]));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "B");
    }

    #[test]
    fn highest_tier_selected_when_single_allowed() {
        let tiers = tiers();
        let selected = select_paychecks(
            &tiers,
            false,
            grants(&["paycheck.a", "paycheck.c"]),
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "C");
    }

    #[test]
    fn all_eligible_in_order_when_multiple_allowed() {
        let tiers = tiers();
        let selected = select_paychecks(
            &tiers,
            true,
            grants(&["paycheck.c", "paycheck.a"]),
        );
        let names: Vec<&str> = selected.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn permission_key_uses_lowercased_name() {
        let tiers = vec![PaycheckTier::new("MSGT", 400)];
        assert!(select_paychecks(&tiers, false, grants(&["paycheck.MSGT"])).is_empty());
        assert_eq!(
            select_paychecks(&tiers, false, grants(&["paycheck.msgt"])).len(),
            1
        );
    }

    #[test]
    fn experience_sum_saturates() {
        let a = PaycheckTier::new("a", u32::MAX);
        let b = PaycheckTier::new("b", 10);
        assert_eq!(experience_sum(&[&a, &b]), u32::MAX);
        assert_eq!(experience_sum(&[]), 0);
    }

    proptest! {
        #[test]
        fn single_selection_is_an_eligible_maximum(
            xps in proptest::collection::vec(0u32..1_000, 1..12),
            mask in proptest::collection::vec(any::<bool>(), 12),
        ) {
            let tiers: Vec<PaycheckTier> = xps
                .iter()
                .enumerate()
                .map(|(i, xp)| PaycheckTier::new(format!("t{i}"), *xp))
                .collect();
            let granted: HashSet<String> = tiers
                .iter()
                .zip(&mask)
                .filter(|(_, on)| **on)
                .map(|(t, _)| t.permission())
                .collect();

            let selected = select_paychecks(&tiers, false, |k| granted.contains(k));
            let eligible: Vec<&PaycheckTier> =
                tiers.iter().filter(|t| granted.contains(&t.permission())).collect();

            prop_assert!(selected.len() <= 1);
            prop_assert_eq!(selected.is_empty(), eligible.is_empty());
            if let Some(chosen) = selected.first() {
                let max = eligible.iter().map(|t| t.experience).max().unwrap();
                prop_assert_eq!(chosen.experience, max);
                let first = eligible.iter().find(|t| t.experience == max).unwrap();
                prop_assert_eq!(&chosen.name, &first.name);
            }
        }
    }
}
