//! Pure navigation helpers over the flow table
//!
//! Everything here is stateless: lookups, terminality checks, ancestry
//! reconstruction, and the one-step lookahead used to resume a walk from
//! recorded history. Unknown ids are recoverable (`None`/`false`), never
//! a panic; the only fatal condition, a missing root, is rejected at
//! table construction.

use super::table::{FlowTable, Step, START_STEP_ID};

/// Aggregate numbers about a flow table, for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStats {
    /// Total number of steps
    pub total_steps: usize,
    /// Number of terminal steps
    pub end_steps: usize,
    /// Largest option count on any single step
    pub max_options: usize,
    /// Mean option count across all steps
    pub average_options: f64,
}

impl FlowTable {
    /// Looks up a step by id
    ///
    /// Unknown ids return `None`; callers treat this as a recoverable
    /// condition (log and ignore the transition).
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.get(id)
    }

    /// Returns the root step
    ///
    /// Table construction guarantees the `"start"` entry exists, so this
    /// cannot fail at runtime.
    pub fn initial_step(&self) -> &Step {
        self.get(START_STEP_ID)
            .expect("flow table construction guarantees a start step")
    }

    /// True if the step exists and is terminal; false for unknown ids
    pub fn is_end(&self, id: &str) -> bool {
        self.get(id).map(|s| s.end).unwrap_or(false)
    }

    /// Membership test
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Reconstructs the ancestor-id chain for a step, root first
    ///
    /// Ancestry is derived by repeatedly stripping the last
    /// underscore-delimited segment until reaching `"start"` or running out
    /// of segments. This is a naming convention, not a structural parent
    /// pointer: it only holds because ids are authored with hierarchical
    /// underscore prefixes. Known fragility, kept deliberately.
    pub fn step_path(&self, id: &str) -> Vec<String> {
        let mut path = vec![id.to_string()];
        let mut current = id.to_string();
        while current != START_STEP_ID {
            match current.rfind('_') {
                Some(idx) => {
                    current.truncate(idx);
                    path.push(current.clone());
                }
                None => {
                    if current != START_STEP_ID {
                        path.push(START_STEP_ID.to_string());
                    }
                    break;
                }
            }
        }
        path.reverse();
        path
    }

    /// One-step lookahead over recorded history
    ///
    /// Empty history yields the initial step. Otherwise only the last entry
    /// is inspected: a non-terminal step is offered as-is; a terminal or
    /// unresolvable entry means the walk is over and the initial step is
    /// offered to start again.
    pub fn suggestions(&self, history: &[String]) -> Vec<&Step> {
        let last = match history.last() {
            Some(last) => last,
            None => return vec![self.initial_step()],
        };
        match self.get(last) {
            Some(step) if !step.end => vec![step],
            _ => vec![self.initial_step()],
        }
    }

    /// Computes aggregate statistics over the table
    pub fn stats(&self) -> FlowStats {
        let total_steps = self.len();
        let end_steps = self.steps().filter(|s| s.end).count();
        let max_options = self.steps().map(|s| s.options.len()).max().unwrap_or(0);
        let option_total: usize = self.steps().map(|s| s.options.len()).sum();
        let average_options = if total_steps == 0 {
            0.0
        } else {
            option_total as f64 / total_steps as f64
        };
        FlowStats {
            total_steps,
            end_steps,
            max_options,
            average_options,
        }
    }
}
