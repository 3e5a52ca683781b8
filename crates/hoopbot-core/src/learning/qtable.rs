//! Dense state x action value table with flat-file persistence.
//!
//! The on-disk format is a whitespace-delimited matrix of floating-point
//! values, one row per state, one column per action. It is reloaded
//! verbatim on startup so learning progress survives a process restart.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QTableError {
    #[error("table file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {row}: '{token}' is not a number")]
    Parse { row: usize, token: String },
    #[error("table is {found_states}x{found_actions}, expected {states}x{actions}")]
    Shape {
        states: usize,
        actions: usize,
        found_states: usize,
        found_actions: usize,
    },
}

/// `num_states x num_actions` action-value matrix. Actions are indexed
/// 0-based here; the 1-based external action ids live in [`crate::learning::Action`].
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
}

impl QTable {
    pub fn zeroed(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    /// Restore the table from `path` when the file exists, validating its
    /// shape against the configured dimensions; start zeroed otherwise.
    pub fn load_or_zeroed(
        path: &Path,
        num_states: usize,
        num_actions: usize,
    ) -> Result<Self, QTableError> {
        if !path.exists() {
            return Ok(Self::zeroed(num_states, num_actions));
        }

        let text = fs::read_to_string(path)?;
        let mut values = Vec::with_capacity(num_states * num_actions);
        let mut found_states = 0;
        let mut found_actions = 0;
        for (row, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let mut columns = 0;
            for token in line.split_whitespace() {
                let value = token.parse::<f64>().map_err(|_| QTableError::Parse {
                    row,
                    token: token.to_string(),
                })?;
                values.push(value);
                columns += 1;
            }
            if row == 0 {
                found_actions = columns;
            } else if columns != found_actions {
                // ragged matrix, report the offending width
                return Err(QTableError::Shape {
                    states: num_states,
                    actions: num_actions,
                    found_states: row + 1,
                    found_actions: columns,
                });
            }
            found_states = row + 1;
        }

        if found_states != num_states || found_actions != num_actions {
            return Err(QTableError::Shape {
                states: num_states,
                actions: num_actions,
                found_states,
                found_actions,
            });
        }

        Ok(Self {
            values,
            num_states,
            num_actions,
        })
    }

    /// Write the full matrix to `path`, replacing any previous contents.
    pub fn save(&self, path: &Path) -> Result<(), QTableError> {
        let mut out = String::new();
        for state in 0..self.num_states {
            let row: Vec<String> = self.row(state).iter().map(|v| v.to_string()).collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    pub fn get(&self, state: usize, action_index: usize) -> f64 {
        self.values[state * self.num_actions + action_index]
    }

    pub fn set(&mut self, state: usize, action_index: usize, value: f64) {
        self.values[state * self.num_actions + action_index] = value;
    }

    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.num_actions;
        &self.values[start..start + self.num_actions]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtable.txt");

        let mut table = QTable::zeroed(3, 4);
        table.set(0, 0, -50.0);
        table.set(2, 3, 25.5);
        table.save(&path).unwrap();

        let restored = QTable::load_or_zeroed(&path, 3, 4).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn missing_file_starts_zeroed() {
        let dir = tempfile::tempdir().unwrap();
        let table = QTable::load_or_zeroed(&dir.path().join("absent.txt"), 2, 2).unwrap();
        assert_eq!(table, QTable::zeroed(2, 2));
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtable.txt");
        QTable::zeroed(3, 4).save(&path).unwrap();

        let err = QTable::load_or_zeroed(&path, 5, 4).unwrap_err();
        assert!(matches!(err, QTableError::Shape { .. }));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qtable.txt");
        fs::write(&path, "0 0\n0 oops\n").unwrap();

        let err = QTable::load_or_zeroed(&path, 2, 2).unwrap_err();
        assert!(matches!(err, QTableError::Parse { row: 1, .. }));
    }
}
