use super::*;

fn run_until_complete(s: &AnimationScheduler, max_ticks: usize) -> (AnimationState, usize) {
    let mut state = s.initial();
    let mut transitions = 0;
    for _ in 0..max_ticks {
        if state.complete {
            break;
        }
        let next = s.advance(state);
        if next.phase != state.phase {
            transitions += 1;
        }
        state = next;
    }
    (state, transitions)
}

#[test]
fn rejects_non_positive_speed() {
    assert!(AnimationScheduler::new(0.0, 3).is_err());
    assert!(AnimationScheduler::new(-0.1, 3).is_err());
    assert!(AnimationScheduler::new(f64::INFINITY, 3).is_err());
}

#[test]
fn starts_growing_at_phase_zero() {
    let s = AnimationScheduler::new(0.08, 4).unwrap();
    assert_eq!(
        s.initial(),
        AnimationState {
            phase: 0,
            progress: 0.0,
            complete: false
        }
    );
}

#[test]
fn progress_accumulates_then_rolls_over() {
    let s = AnimationScheduler::new(0.25, 4).unwrap();
    let mut st = s.initial();
    for expected in [0.25, 0.5, 0.75] {
        st = s.advance(st);
        assert_eq!(st.phase, 0);
        assert!((st.progress - expected).abs() < 1e-12);
    }
    st = s.advance(st);
    assert_eq!(st.phase, 1);
    assert_eq!(st.progress, 0.0);
    assert!(!st.complete);
}

#[test]
fn completes_after_exactly_n_transitions() {
    let n = 7;
    let s = AnimationScheduler::new(0.08, n).unwrap();
    let (state, transitions) = run_until_complete(&s, 10_000);

    assert!(state.complete);
    assert_eq!(transitions, n);
    assert_eq!(state.phase, n);
    assert_eq!(state.progress, 1.0);
}

#[test]
fn complete_state_is_fixed_point() {
    let s = AnimationScheduler::new(0.5, 2).unwrap();
    let (done, _) = run_until_complete(&s, 100);
    assert!(done.complete);
    for _ in 0..5 {
        assert_eq!(s.advance(done), done);
    }
}

#[test]
fn empty_schedule_completes_on_first_tick() {
    let s = AnimationScheduler::new(0.08, 0).unwrap();
    let st = s.advance(s.initial());
    assert!(st.complete);
    assert_eq!(st.progress, 1.0);
}

#[test]
fn reset_returns_to_initial_from_any_state() {
    let s = AnimationScheduler::new(0.08, 40).unwrap();
    let mid = AnimationState {
        phase: 5,
        progress: 0.5,
        complete: false,
    };
    assert_eq!(s.reset(), s.initial());
    assert_ne!(mid, s.reset());

    let (done, _) = run_until_complete(&AnimationScheduler::new(0.5, 1).unwrap(), 10);
    assert!(done.complete);
    assert!(!s.reset().complete);
}

#[test]
fn spoke_stage_partitions_flat_indices() {
    let st = AnimationState {
        phase: 3,
        progress: 0.4,
        complete: false,
    };
    assert_eq!(AnimationScheduler::spoke_stage(&st, 0), SpokeStage::Grown);
    assert_eq!(AnimationScheduler::spoke_stage(&st, 2), SpokeStage::Grown);
    assert_eq!(
        AnimationScheduler::spoke_stage(&st, 3),
        SpokeStage::Growing(0.4)
    );
    assert_eq!(AnimationScheduler::spoke_stage(&st, 4), SpokeStage::Hidden);

    let done = AnimationState {
        phase: 3,
        progress: 1.0,
        complete: true,
    };
    assert_eq!(AnimationScheduler::spoke_stage(&done, 99), SpokeStage::Grown);
}

#[test]
fn stage_progress_values() {
    assert_eq!(SpokeStage::Hidden.progress(), None);
    assert_eq!(SpokeStage::Growing(0.3).progress(), Some(0.3));
    assert_eq!(SpokeStage::Grown.progress(), Some(1.0));
}
