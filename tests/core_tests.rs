// tests/core_tests.rs
use hoopbot_core::{BasketTracker, GridSpec, Point, Policy, PolicyConfig, Roi, ScoreReading};

#[test]
fn attempt_cycle_learns_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config = PolicyConfig {
        table_path: dir.path().join("qtable.txt"),
        ..Default::default()
    };

    // quantize a ball sighting the way the extractor does
    let grid = GridSpec::new(Roi::new(0, 202, 250, 360), 7, 1);
    let cell = grid.cell_of(Point::new(100.0, 300.0));
    let state = cell.i as usize;

    let mut policy = Policy::new(config.clone()).unwrap();
    let action = policy.choose_action(state);
    policy.update(state, action, ScoreReading::Missed).unwrap();
    assert_eq!(policy.table().get(state, action.index()), -50.0);

    // a restarted process picks up where the last one stopped, and its
    // greedy choice steers away from the punished action
    let restored = Policy::new(config).unwrap();
    assert_eq!(restored.table().get(state, action.index()), -50.0);
    assert_ne!(restored.choose_action(state).index(), action.index());
}

#[test]
fn basket_track_survives_an_attempt_but_not_a_dropout() {
    let mut tracker = BasketTracker::new();
    let grid = GridSpec::new(Roi::new(0, 202, 50, 200), 9, 9);

    tracker.observe(Some(Point::new(40.0, 120.0)), 0.0);
    tracker.observe(Some(Point::new(60.0, 120.0)), 0.1);
    let predicted = tracker.predict().expect("steady track");
    assert_eq!(predicted, Point::new(80.0, 120.0));
    // the hint stays inside the basket region, so it can be quantized
    assert!(grid.roi.contains(predicted));
    let _ = grid.cell_of(predicted);

    tracker.observe(None, 0.2);
    assert_eq!(tracker.predict(), None);
}
