//! Action selection and the one-step value update.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::qtable::QTable;
use crate::state::ScoreReading;

pub const REWARD_SCORED: f64 = 100.0;
pub const REWARD_MISSED: f64 = -100.0;

/// 1-based action id as understood by the arm firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action(usize);

impl Action {
    /// Wrap an external 1-based action id.
    pub fn from_id(id: usize) -> Self {
        assert!(id >= 1, "action ids are 1-based");
        Self(id)
    }

    /// External 1-based id, the number sent over the wire.
    pub fn id(self) -> usize {
        self.0
    }

    /// 0-based column into the value table.
    pub fn index(self) -> usize {
        self.0 - 1
    }

    fn from_index(index: usize) -> Self {
        Self(index + 1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Number of discrete ball states. Must cover the ball grid's columns.
    pub num_states: usize,
    /// Number of discrete arm commands the firmware accepts.
    pub num_actions: usize,
    /// Learning rate of the one-step update.
    pub alpha: f64,
    /// Discount factor. Carried from the tuned deployment but not applied:
    /// the update rule is undiscounted one-step, with no future term.
    pub gamma: f64,
    /// Where the value table is persisted after every update.
    pub table_path: PathBuf,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            num_states: 15,
            num_actions: 18,
            alpha: 0.5,
            gamma: 0.5,
            table_path: "qtable.txt".into(),
        }
    }
}

/// Tabular value policy: greedy exploitation over visited states, uniform
/// exploration on untouched ones.
pub struct Policy {
    config: PolicyConfig,
    table: QTable,
    /// Score shown by the machine the last time an attempt landed. Kept for
    /// operator logs only; no decision reads it.
    last_scored: u32,
}

impl Policy {
    /// Build the policy, restoring the persisted table when one exists.
    pub fn new(config: PolicyConfig) -> Result<Self> {
        let table =
            QTable::load_or_zeroed(&config.table_path, config.num_states, config.num_actions)
                .with_context(|| {
                    format!("failed to restore value table from {:?}", config.table_path)
                })?;
        Ok(Self {
            config,
            table,
            last_scored: 0,
        })
    }

    /// One-step update for the attempt just completed:
    /// `Q[s,a] += alpha * (reward - Q[s,a])`. The table is persisted before
    /// returning so progress survives a restart.
    pub fn update(&mut self, state: usize, action: Action, reading: ScoreReading) -> Result<()> {
        let reward = self.reward(reading);
        let current = self.table.get(state, action.index());
        let updated = current + self.config.alpha * (reward - current);
        self.table.set(state, action.index(), updated);
        debug!("Q[{state},{}]: {current} -> {updated}", action.id());

        self.table
            .save(&self.config.table_path)
            .with_context(|| format!("failed to persist value table to {:?}", self.config.table_path))
    }

    /// Greedy over the state's row, first maximum winning ties. A row that
    /// was never updated (all zeros) gets a uniformly random action instead.
    pub fn choose_action(&self, state: usize) -> Action {
        let row = self.table.row(state);
        if row.iter().all(|&value| value == 0.0) {
            let index = rand::thread_rng().gen_range(0..row.len());
            return Action::from_index(index);
        }

        let mut best = 0;
        for (index, &value) in row.iter().enumerate() {
            if value > row[best] {
                best = index;
            }
        }
        Action::from_index(best)
    }

    fn reward(&mut self, reading: ScoreReading) -> f64 {
        match reading {
            ScoreReading::Missed => {
                self.last_scored = 0;
                REWARD_MISSED
            }
            ScoreReading::Points(points) => {
                info!("attempt landed for {points}");
                self.last_scored = points;
                REWARD_SCORED
            }
            // The machine kept a score we could not read; count the attempt
            // as landed, leaving the tracker alone.
            ScoreReading::Unreadable => REWARD_SCORED,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn last_scored(&self) -> u32 {
        self.last_scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy(dir: &tempfile::TempDir) -> Policy {
        let config = PolicyConfig {
            num_states: 7,
            num_actions: 5,
            table_path: dir.path().join("qtable.txt"),
            ..Default::default()
        };
        Policy::new(config).unwrap()
    }

    #[test]
    fn untouched_state_explores_among_zero_valued_actions() {
        let dir = tempfile::tempdir().unwrap();
        let policy = test_policy(&dir);
        for _ in 0..50 {
            let action = policy.choose_action(2);
            assert!((1..=5).contains(&action.id()));
            assert_eq!(policy.table().get(2, action.index()), 0.0);
        }
    }

    #[test]
    fn visited_state_exploits_greedily() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = test_policy(&dir);
        policy.update(3, Action::from_id(2), ScoreReading::Points(4)).unwrap();
        policy.update(3, Action::from_id(4), ScoreReading::Missed).unwrap();
        for _ in 0..10 {
            assert_eq!(policy.choose_action(3), Action::from_id(2));
        }
    }

    #[test]
    fn first_maximum_wins_ties() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = test_policy(&dir);
        policy.update(0, Action::from_id(3), ScoreReading::Points(1)).unwrap();
        policy.update(0, Action::from_id(5), ScoreReading::Points(1)).unwrap();
        assert_eq!(policy.choose_action(0), Action::from_id(3));
    }

    #[test]
    fn update_sequence_matches_the_one_step_rule() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = test_policy(&dir);
        let action = Action::from_id(1);

        policy.update(0, action, ScoreReading::Missed).unwrap();
        assert_eq!(policy.table().get(0, action.index()), -50.0);

        policy.update(0, action, ScoreReading::Points(3)).unwrap();
        assert_eq!(policy.table().get(0, action.index()), 25.0);
    }

    #[test]
    fn unreadable_score_counts_as_landed() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = test_policy(&dir);
        policy.update(1, Action::from_id(1), ScoreReading::Unreadable).unwrap();
        assert_eq!(policy.table().get(1, 0), 50.0);
    }

    #[test]
    fn scored_points_drive_the_informational_tracker() {
        let dir = tempfile::tempdir().unwrap();
        let mut policy = test_policy(&dir);
        policy.update(0, Action::from_id(1), ScoreReading::Points(7)).unwrap();
        assert_eq!(policy.last_scored(), 7);
        policy.update(0, Action::from_id(1), ScoreReading::Unreadable).unwrap();
        assert_eq!(policy.last_scored(), 7);
        policy.update(0, Action::from_id(1), ScoreReading::Missed).unwrap();
        assert_eq!(policy.last_scored(), 0);
    }

    #[test]
    fn every_update_reaches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = PolicyConfig {
            num_states: 7,
            num_actions: 5,
            table_path: dir.path().join("qtable.txt"),
            ..Default::default()
        };
        let mut policy = Policy::new(config.clone()).unwrap();
        policy.update(6, Action::from_id(5), ScoreReading::Missed).unwrap();

        let restored = Policy::new(config).unwrap();
        assert_eq!(restored.table().get(6, 4), -50.0);
    }
}
