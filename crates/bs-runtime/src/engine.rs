use bs_core::{BlockSeqError, ExecutionOutcome, Verdict};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::sequence::Instruction;
use crate::store::VariableStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub outcome: ExecutionOutcome,
    pub invoked: Vec<usize>,
}

impl ExecutionReport {
    pub fn verdict(&self) -> Option<Verdict> {
        self.outcome.verdict()
    }
}

#[derive(Debug, Default)]
pub struct ExecutionEngine {
    store: VariableStore,
    last: Option<ExecutionReport>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn last_report(&self) -> Option<&ExecutionReport> {
        self.last.as_ref()
    }

    pub fn execute(&mut self, board: &Board) -> Result<ExecutionReport, BlockSeqError> {
        let sequence = board.sequence();
        let mut invoked = Vec::with_capacity(sequence.len());
        let mut outcome = None;

        for index in 0..sequence.len() {
            let Some(instruction) = sequence.entry(index) else {
                debug!(gap = index, "sequence halted at gap");
                outcome = Some(ExecutionOutcome::Halted { gap: index });
                break;
            };
            invoked.push(index);

            let step = match instruction {
                Instruction::Start => {
                    // Replays without a board change must give the same store.
                    self.store.reset();
                    let action = board.start().action().ok_or_else(|| missing_action("start"))?;
                    action(&mut self.store).map(|_| None)
                }
                Instruction::Source(id) => {
                    let source = board.require_source(id)?;
                    let action = source
                        .action()
                        .ok_or_else(|| missing_action(&format!("source {}", id)))?;
                    action(&mut self.store).map(|_| None)
                }
                Instruction::End => {
                    let verdict = board.end().verdict().ok_or_else(|| missing_action("end"))?;
                    verdict(&self.store).map(Some)
                }
            };

            match step {
                Ok(Some(verdict)) => {
                    info!(verdict = verdict.label(), "sequence completed");
                    outcome = Some(ExecutionOutcome::Completed { verdict });
                    break;
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(index, error = %error, "action faulted");
                    outcome = Some(ExecutionOutcome::Faulted {
                        index,
                        message: error.to_string(),
                    });
                    break;
                }
            }
        }

        let outcome = outcome.ok_or_else(|| {
            BlockSeqError::new(
                "ENGINE_SEQUENCE_UNTERMINATED",
                "Sequence ran past its last entry without reaching the end block.",
            )
        })?;
        let report = ExecutionReport { outcome, invoked };
        self.last = Some(report.clone());
        Ok(report)
    }
}

fn missing_action(owner: &str) -> BlockSeqError {
    BlockSeqError::new(
        "ENGINE_ACTION_MISSING",
        format!("No action is attached to the {} block.", owner),
    )
}
