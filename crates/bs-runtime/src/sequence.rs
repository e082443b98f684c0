use bs_core::{BlockSeqError, FillState, SourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Start,
    Source(SourceId),
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSequence {
    // Always rows + 2 long; row entries are cleared, never removed.
    entries: Vec<Option<Instruction>>,
}

impl InstructionSequence {
    pub fn new(rows: usize) -> Self {
        let mut entries = Vec::with_capacity(rows + 2);
        entries.push(Some(Instruction::Start));
        entries.extend(std::iter::repeat(None).take(rows));
        entries.push(Some(Instruction::End));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.entries.len() - 2
    }

    pub fn entry(&self, index: usize) -> Option<Instruction> {
        self.entries.get(index).copied().flatten()
    }

    pub fn row_entry(&self, row: usize) -> Option<SourceId> {
        match self.entry(row) {
            Some(Instruction::Source(source)) if (1..=self.rows()).contains(&row) => Some(source),
            _ => None,
        }
    }

    pub(crate) fn set_row(
        &mut self,
        row: usize,
        source: Option<SourceId>,
    ) -> Result<(), BlockSeqError> {
        if row == 0 || row > self.rows() {
            return Err(BlockSeqError::new(
                "SEQUENCE_ROW_OUT_OF_RANGE",
                format!("Row {} is outside 1..={}.", row, self.rows()),
            ));
        }
        self.entries[row] = source.map(Instruction::Source);
        Ok(())
    }

    pub fn first_gap(&self) -> Option<usize> {
        self.entries.iter().position(Option::is_none)
    }

    pub fn filled_rows(&self) -> usize {
        (1..=self.rows())
            .filter(|row| self.entries[*row].is_some())
            .count()
    }

    pub fn fill_state(&self) -> FillState {
        let filled = self.filled_rows();
        if filled == 0 {
            FillState::Pristine
        } else if filled == self.rows() {
            FillState::Complete
        } else {
            FillState::Partial
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Instruction>> + '_ {
        self.entries.iter().copied()
    }
}
