//! Property tests over randomized reference strings.

use pagesim_core::{simulate, HelperState, Page, Policy};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn inputs() -> impl Strategy<Value = (Vec<Page>, usize)> {
    (vec(0u32..12, 1..48), 1usize..=10)
}

proptest! {
    #[test]
    fn counters_are_consistent_at_every_step((pages, frames) in inputs()) {
        for policy in Policy::ALL {
            let history = simulate(&pages, frames, policy);
            prop_assert_eq!(history.len(), pages.len());
            for (index, step) in history.steps().iter().enumerate() {
                prop_assert_eq!(step.stats.total, index + 1);
                prop_assert_eq!(step.stats.hits + step.stats.faults, step.stats.total);
            }
            prop_assert_eq!(history.final_stats().total, pages.len());
        }
    }

    #[test]
    fn hit_classification_matches_prior_residency((pages, frames) in inputs()) {
        for policy in Policy::ALL {
            let history = simulate(&pages, frames, policy);
            for (index, step) in history.steps().iter().enumerate() {
                let resident_before = if index == 0 {
                    false
                } else {
                    history.steps()[index - 1].frames.contains(step.page)
                };
                prop_assert_eq!(
                    step.hit, resident_before,
                    "policy {} step {}", policy, index
                );
            }
        }
    }

    #[test]
    fn frames_never_hold_duplicates((pages, frames) in inputs()) {
        for policy in Policy::ALL {
            let history = simulate(&pages, frames, policy);
            for step in history.steps() {
                let residents: Vec<Page> =
                    step.frames.residents().map(|(_, page)| page).collect();
                let unique: BTreeSet<Page> = residents.iter().copied().collect();
                prop_assert_eq!(unique.len(), residents.len());
            }
        }
    }

    #[test]
    fn optimal_is_never_worse((pages, frames) in inputs()) {
        let optimal = simulate(&pages, frames, Policy::Optimal).final_stats().faults;
        let fifo = simulate(&pages, frames, Policy::Fifo).final_stats().faults;
        let lru = simulate(&pages, frames, Policy::Lru).final_stats().faults;
        prop_assert!(optimal <= fifo, "optimal {} > fifo {}", optimal, fifo);
        prop_assert!(optimal <= lru, "optimal {} > lru {}", optimal, lru);
    }

    #[test]
    fn lru_hits_move_page_to_front((pages, frames) in inputs()) {
        let history = simulate(&pages, frames, Policy::Lru);
        for step in history.steps() {
            if step.hit {
                match &step.helper {
                    HelperState::LruStack(stack) => {
                        prop_assert_eq!(stack.first().copied(), Some(step.page));
                    }
                    other => prop_assert!(false, "unexpected helper: {:?}", other),
                }
            }
        }
    }

    #[test]
    fn fifo_evictions_follow_load_order((pages, frames) in inputs()) {
        let history = simulate(&pages, frames, Policy::Fifo);
        // Pages leave in exactly the order they were loaded.
        let mut loads: Vec<Page> = Vec::new();
        for step in history.steps() {
            if let Some(victim) = step.evicted {
                prop_assert_eq!(loads.first().copied(), Some(victim));
                loads.remove(0);
            }
            if !step.hit {
                loads.push(step.page);
            }
        }
    }

    #[test]
    fn helper_membership_matches_frames((pages, frames) in inputs()) {
        for policy in [Policy::Fifo, Policy::Lru] {
            let history = simulate(&pages, frames, policy);
            for step in history.steps() {
                let frames_set: BTreeSet<Page> =
                    step.frames.residents().map(|(_, page)| page).collect();
                let helper_set: BTreeSet<Page> =
                    step.helper.pages().iter().copied().collect();
                prop_assert_eq!(&frames_set, &helper_set, "policy {}", policy);
            }
        }
    }
}
