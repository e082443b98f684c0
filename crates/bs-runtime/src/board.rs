use bs_core::{BlockSeqError, FillState, Point, SourceId};
use tracing::debug;

use crate::block::{EndBlock, StartBlock};
use crate::registry::SlotRegistry;
use crate::sequence::InstructionSequence;
use crate::slot::DestinationSlot;
use crate::source::SourceBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub evicted: Option<SourceId>,
}

#[derive(Debug)]
pub struct Board {
    start: StartBlock,
    end: EndBlock,
    slots: Vec<DestinationSlot>,
    sources: Vec<SourceBlock>,
    registry: SlotRegistry,
    sequence: InstructionSequence,
}

impl Board {
    pub(crate) fn new(
        start: StartBlock,
        end: EndBlock,
        slots: Vec<DestinationSlot>,
        sources: Vec<SourceBlock>,
        registry: SlotRegistry,
    ) -> Self {
        let sequence = InstructionSequence::new(slots.len());
        Self {
            start,
            end,
            slots,
            sources,
            registry,
            sequence,
        }
    }

    pub fn start(&self) -> &StartBlock {
        &self.start
    }

    pub fn end(&self) -> &EndBlock {
        &self.end
    }

    pub fn slots(&self) -> &[DestinationSlot] {
        &self.slots
    }

    pub fn slot(&self, row: usize) -> Option<&DestinationSlot> {
        row.checked_sub(1).and_then(|index| self.slots.get(index))
    }

    pub(crate) fn slot_mut(&mut self, row: usize) -> Option<&mut DestinationSlot> {
        row.checked_sub(1).and_then(|index| self.slots.get_mut(index))
    }

    pub fn sources(&self) -> &[SourceBlock] {
        &self.sources
    }

    pub fn source(&self, id: SourceId) -> Option<&SourceBlock> {
        self.sources.get(id.0)
    }

    pub(crate) fn source_mut(&mut self, id: SourceId) -> Option<&mut SourceBlock> {
        self.sources.get_mut(id.0)
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn sequence(&self) -> &InstructionSequence {
        &self.sequence
    }

    pub fn row_count(&self) -> usize {
        self.slots.len()
    }

    pub fn fill_state(&self) -> FillState {
        self.sequence.fill_state()
    }

    pub fn occupant(&self, row: usize) -> Option<SourceId> {
        self.slot(row).and_then(DestinationSlot::occupant)
    }

    pub fn zone_at(&self, point: Point) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.hit_test(point))
            .map(DestinationSlot::row)
    }

    pub fn source_at(&self, point: Point) -> Option<SourceId> {
        self.sources
            .iter()
            .rev()
            .find(|source| source.block().bounds().contains(point))
            .map(SourceBlock::id)
    }

    pub(crate) fn require_source(&self, id: SourceId) -> Result<&SourceBlock, BlockSeqError> {
        self.source(id).ok_or_else(|| {
            BlockSeqError::new(
                "BOARD_SOURCE_UNKNOWN",
                format!("Source {} does not exist on this board.", id),
            )
        })
    }

    pub fn bound_row(&self, source: SourceId) -> Result<usize, BlockSeqError> {
        self.registry.bound_row(source).ok_or_else(|| {
            BlockSeqError::new(
                "BOARD_SOURCE_UNKNOWN",
                format!("Source {} does not exist on this board.", source),
            )
        })
    }

    pub(crate) fn require_slot(&self, row: usize) -> Result<&DestinationSlot, BlockSeqError> {
        self.slot(row).ok_or_else(|| {
            BlockSeqError::new(
                "BOARD_ROW_UNKNOWN",
                format!("Destination row {} does not exist on this board.", row),
            )
        })
    }

    // The only occupancy write; slot and sequence change together.
    pub(crate) fn set_occupant(
        &mut self,
        row: usize,
        occupant: Option<SourceId>,
    ) -> Result<Option<SourceId>, BlockSeqError> {
        self.require_slot(row)?;
        self.sequence.set_row(row, occupant)?;
        let previous = self
            .slot_mut(row)
            .map(|slot| slot.set_occupant(occupant))
            .unwrap_or_default();
        debug_assert!(self.occupancy_consistent());
        Ok(previous)
    }

    pub(crate) fn place(
        &mut self,
        source: SourceId,
        row: usize,
    ) -> Result<Placement, BlockSeqError> {
        let bound = self.bound_row(source)?;
        if bound != row {
            return Err(BlockSeqError::new(
                "BOARD_BINDING_MISMATCH",
                format!("Source {} is bound to row {}, not row {}.", source, bound, row),
            ));
        }
        let slot_position = self.require_slot(row)?.position();

        let previous = self.set_occupant(row, Some(source))?;
        let evicted = previous.filter(|occupant| *occupant != source);
        if let Some(evicted) = evicted {
            if let Some(block) = self.source_mut(evicted) {
                block.reset_position();
            }
        }
        if let Some(block) = self.source_mut(source) {
            block.move_to(slot_position);
        }
        debug!(source = %source, row, evicted = ?evicted, "placed source");
        Ok(Placement { row, evicted })
    }

    pub(crate) fn detach(&mut self, source: SourceId) -> Result<Option<usize>, BlockSeqError> {
        let row = self.bound_row(source)?;
        if self.occupant(row) != Some(source) {
            return Ok(None);
        }
        self.set_occupant(row, None)?;
        if let Some(block) = self.source_mut(source) {
            block.reset_position();
        }
        debug!(source = %source, row, "detached source");
        Ok(Some(row))
    }

    pub(crate) fn clear_all(&mut self) -> Result<(), BlockSeqError> {
        for row in 1..=self.row_count() {
            self.set_occupant(row, None)?;
            if let Some(slot) = self.slot_mut(row) {
                slot.highlight(false);
            }
        }
        for source in &mut self.sources {
            source.reset_position();
            source.set_active(false);
        }
        Ok(())
    }

    pub fn update(&mut self) {
        self.start.block_mut().update();
        self.end.block_mut().update();
        for slot in &mut self.slots {
            slot.block_mut().update();
        }
        for source in &mut self.sources {
            source.block_mut().update();
        }
    }

    pub fn occupancy_consistent(&self) -> bool {
        self.slots.iter().all(|slot| {
            let row = slot.row();
            let bound_ok = slot
                .occupant()
                .map(|source| self.registry.is_bound(source, row))
                .unwrap_or(true);
            bound_ok && self.sequence.row_entry(row) == slot.occupant()
        })
    }
}
