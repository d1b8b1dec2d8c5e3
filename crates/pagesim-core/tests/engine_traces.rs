//! Trace-level tests against hand-checked reference runs.

use pagesim_core::{simulate, HelperState, Page, Policy};

const SILBERSCHATZ: [Page; 13] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

fn faults(pages: &[Page], frames: usize, policy: Policy) -> usize {
    simulate(pages, frames, policy).final_stats().faults
}

#[test]
fn fifo_classic_reference_string() {
    let history = simulate(&SILBERSCHATZ, 3, Policy::Fifo);
    assert_eq!(history.final_stats().faults, 10);
    assert_eq!(history.final_stats().hits, 3);

    // Hand-checked eviction sequence: insertion order, hits ignored.
    let evictions: Vec<Page> = history
        .steps()
        .iter()
        .filter_map(|s| s.evicted)
        .collect();
    assert_eq!(evictions, vec![7, 0, 1, 2, 3, 0, 4]);

    // Hits land on steps 5, 12, and 13 (1-based).
    let hits: Vec<usize> = history
        .steps()
        .iter()
        .filter(|s| s.hit)
        .map(|s| s.step)
        .collect();
    assert_eq!(hits, vec![4, 11, 12]);
}

#[test]
fn lru_classic_reference_string() {
    let history = simulate(&SILBERSCHATZ, 3, Policy::Lru);
    assert_eq!(history.final_stats().faults, 9);
    assert_eq!(history.final_stats().hits, 4);

    let evictions: Vec<Page> = history
        .steps()
        .iter()
        .filter_map(|s| s.evicted)
        .collect();
    assert_eq!(evictions, vec![7, 1, 2, 3, 0, 4]);
}

#[test]
fn optimal_classic_reference_string() {
    let history = simulate(&SILBERSCHATZ, 3, Policy::Optimal);
    assert_eq!(history.final_stats().faults, 7);

    // Optimal must beat or match both practical policies.
    assert!(history.final_stats().faults <= faults(&SILBERSCHATZ, 3, Policy::Fifo));
    assert!(history.final_stats().faults <= faults(&SILBERSCHATZ, 3, Policy::Lru));
}

#[test]
fn four_frames_first_fill_then_hits_then_fault() {
    for policy in Policy::ALL {
        let history = simulate(&[1, 2, 3, 4, 1, 2, 5], 4, policy);
        let steps = history.steps();
        // First four references fill the empty frames.
        for step in &steps[..4] {
            assert!(!step.hit, "{policy}: step {} should fault", step.step);
            assert_eq!(step.evicted, None);
            assert_eq!(step.frame_index, step.step);
        }
        // Fifth and sixth are hits, seventh faults again.
        assert!(steps[4].hit, "{policy}: fifth reference should hit");
        assert!(steps[5].hit, "{policy}: sixth reference should hit");
        assert!(!steps[6].hit, "{policy}: seventh reference should fault");
        assert_eq!(history.final_stats().faults, 5);
    }
}

#[test]
fn lru_victim_is_least_recent_after_hits() {
    // 1,2,3 loaded; hit on 1 protects it, so 2 is evicted next.
    let history = simulate(&[1, 2, 3, 1, 4], 3, Policy::Lru);
    assert_eq!(history.step(4).unwrap().evicted, Some(2));
    match &history.step(3).unwrap().helper {
        HelperState::LruStack(stack) => assert_eq!(stack, &vec![1, 3, 2]),
        other => panic!("unexpected helper: {other:?}"),
    }
}

#[test]
fn fifo_victim_ignores_hits() {
    // Same input under FIFO: the hit on 1 does not protect it.
    let history = simulate(&[1, 2, 3, 1, 4], 3, Policy::Fifo);
    assert_eq!(history.step(4).unwrap().evicted, Some(1));
}

#[test]
fn stats_accumulate_per_step() {
    let history = simulate(&SILBERSCHATZ, 3, Policy::Fifo);
    for (index, step) in history.steps().iter().enumerate() {
        assert_eq!(step.step, index);
        assert_eq!(step.stats.total, index + 1);
        assert_eq!(step.stats.hits + step.stats.faults, step.stats.total);
    }
    assert_eq!(history.final_stats().total, SILBERSCHATZ.len());
}

#[test]
fn history_serializes_and_round_trips_through_json() {
    let history = simulate(&[1, 2, 3, 1], 2, Policy::Lru);
    let json = serde_json::to_string(&history).expect("serialize");
    let back: pagesim_core::History = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, history);
}

#[test]
fn narrations_are_one_based_and_name_the_policy() {
    let history = simulate(&[1, 2, 3], 2, Policy::Optimal);
    assert!(history.step(0).unwrap().narration.starts_with("Step 1:"));
    let last = history.step(2).unwrap();
    assert!(last.narration.contains("Optimal"));
    assert!(last.narration.contains("replaced"));
}
