//! Memoized verdict shared by every val
//!
//! A check body runs at most once per val. The first query stores the
//! verdict together with the messages it produced; every later query reads
//! the stored verdict and never touches the message list again.

use std::cell::OnceCell;

/// Observable evaluation state of a val.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalState {
    /// The check has not run yet
    Unevaluated,
    /// The check ran and passed
    Passed,
    /// The check ran and reported at least one failure
    Failed,
}

/// Stored result of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No failure was reported
    Passed,
    /// Failures in the order they were detected
    Failed(Vec<String>),
}

impl Verdict {
    /// Whether this verdict is a pass.
    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Messages carried by the verdict; empty on a pass.
    pub fn messages(&self) -> &[String] {
        match self {
            Verdict::Passed => &[],
            Verdict::Failed(messages) => messages,
        }
    }
}

/// Write-once verdict cell.
///
/// An empty cell is the unevaluated state.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    verdict: OnceCell<Verdict>,
}

impl Evaluation {
    /// Create an unevaluated cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored verdict, running `check` first if there is none.
    ///
    /// `check` pushes one message per failed condition. No messages means
    /// the check passed.
    pub fn get_or_run<F>(&self, check: F) -> &Verdict
    where
        F: FnOnce(&mut Vec<String>),
    {
        self.verdict.get_or_init(|| {
            let mut messages = Vec::new();
            check(&mut messages);
            if messages.is_empty() {
                Verdict::Passed
            } else {
                Verdict::Failed(messages)
            }
        })
    }

    /// Current state, without forcing evaluation.
    pub fn state(&self) -> EvalState {
        match self.verdict.get() {
            None => EvalState::Unevaluated,
            Some(Verdict::Passed) => EvalState::Passed,
            Some(Verdict::Failed(_)) => EvalState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_check_runs_once() {
        let runs = Cell::new(0);
        let evaluation = Evaluation::new();

        for _ in 0..3 {
            let verdict = evaluation.get_or_run(|messages| {
                runs.set(runs.get() + 1);
                messages.push("bad".to_string());
            });
            assert_eq!(verdict.messages(), ["bad"]);
        }

        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_state_transitions() {
        let evaluation = Evaluation::new();
        assert_eq!(evaluation.state(), EvalState::Unevaluated);

        evaluation.get_or_run(|_| {});
        assert_eq!(evaluation.state(), EvalState::Passed);
    }

    #[test]
    fn test_failed_state() {
        let evaluation = Evaluation::new();
        evaluation.get_or_run(|messages| messages.push("x".into()));
        assert_eq!(evaluation.state(), EvalState::Failed);
        assert!(!evaluation.get_or_run(|_| {}).is_passed());
    }
}
