use bs_core::{BlockSeqError, SourceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRegistry {
    rows: usize,
    bindings: Vec<usize>,
}

impl SlotRegistry {
    pub fn new(rows: &[usize], bindings: Vec<usize>) -> Result<Self, BlockSeqError> {
        let row_count = validate_rows(rows)?;
        for (index, row) in bindings.iter().enumerate() {
            if *row == 0 || *row > row_count {
                return Err(BlockSeqError::new(
                    "LEVEL_BINDING_UNKNOWN_ROW",
                    format!(
                        "Source {} is bound to row {}, but rows run 1..={}.",
                        SourceId(index),
                        row,
                        row_count
                    ),
                ));
            }
        }
        Ok(Self {
            rows: row_count,
            bindings,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn bound_row(&self, source: SourceId) -> Option<usize> {
        self.bindings.get(source.0).copied()
    }

    pub fn is_bound(&self, source: SourceId, row: usize) -> bool {
        self.bound_row(source) == Some(row)
    }
}

pub fn validate_rows(rows: &[usize]) -> Result<usize, BlockSeqError> {
    if rows.is_empty() {
        return Err(BlockSeqError::new(
            "LEVEL_ROWS_EMPTY",
            "A level needs at least one destination row.",
        ));
    }

    let mut sorted = rows.to_vec();
    sorted.sort_unstable();
    for (index, row) in sorted.iter().enumerate() {
        let expected = index + 1;
        if index > 0 && sorted[index - 1] == *row {
            return Err(BlockSeqError::new(
                "LEVEL_ROW_DUPLICATE",
                format!("Destination row {} is declared more than once.", row),
            ));
        }
        if *row != expected {
            return Err(BlockSeqError::new(
                "LEVEL_ROW_GAP",
                format!(
                    "Destination rows must be contiguous from 1; expected row {}, found {}.",
                    expected, row
                ),
            ));
        }
    }
    Ok(sorted.len())
}
