use bs_core::{BlockSeqError, Point, SourceId};
use tracing::debug;

use crate::action::{VariableAction, VerdictAction};
use crate::block::{EndBlock, StartBlock};
use crate::board::Board;
use crate::registry::SlotRegistry;
use crate::slot::DestinationSlot;
use crate::source::SourceBlock;

#[derive(Debug)]
pub struct Level {
    pub id: String,
    pub title: String,
    pub board: Board,
}

#[derive(Debug)]
pub struct LevelBuilder {
    id: String,
    title: String,
    start: Option<StartBlock>,
    end: Option<EndBlock>,
    slots: Vec<DestinationSlot>,
    sources: Vec<SourceBlock>,
    bindings: Vec<usize>,
}

impl LevelBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: None,
            end: None,
            slots: Vec::new(),
            sources: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub fn start(&mut self, position: Point, text: &str) -> Result<(), BlockSeqError> {
        if self.start.is_some() {
            return Err(BlockSeqError::new(
                "LEVEL_START_DUPLICATE",
                format!("Level \"{}\" declares more than one start block.", self.id),
            ));
        }
        let mut start = StartBlock::new(position);
        start.create(text)?;
        self.start = Some(start);
        Ok(())
    }

    pub fn end(&mut self, position: Point, text: &str) -> Result<(), BlockSeqError> {
        if self.end.is_some() {
            return Err(BlockSeqError::new(
                "LEVEL_END_DUPLICATE",
                format!("Level \"{}\" declares more than one end block.", self.id),
            ));
        }
        let mut end = EndBlock::new(position);
        end.create(text)?;
        self.end = Some(end);
        Ok(())
    }

    pub fn destination(
        &mut self,
        row: usize,
        position: Point,
        text: &str,
    ) -> Result<(), BlockSeqError> {
        let mut slot = DestinationSlot::new(row, position);
        slot.create(text)?;
        self.slots.push(slot);
        Ok(())
    }

    pub fn source(
        &mut self,
        position: Point,
        text: &str,
        row: usize,
    ) -> Result<SourceId, BlockSeqError> {
        let id = SourceId(self.sources.len());
        let mut source = SourceBlock::new(id, position);
        source.create(text)?;
        self.sources.push(source);
        self.bindings.push(row);
        Ok(id)
    }

    pub fn set_start_action(&mut self, action: VariableAction) -> Result<(), BlockSeqError> {
        let start = self.start.as_mut().ok_or_else(|| start_missing(&self.id))?;
        start.set_action(action);
        Ok(())
    }

    pub fn set_source_action(
        &mut self,
        id: SourceId,
        action: VariableAction,
    ) -> Result<(), BlockSeqError> {
        let source = self.sources.get_mut(id.0).ok_or_else(|| {
            BlockSeqError::new(
                "LEVEL_SOURCE_UNKNOWN",
                format!("Source {} was never added to level \"{}\".", id, self.id),
            )
        })?;
        source.set_action(action);
        Ok(())
    }

    pub fn set_end_action(&mut self, verdict: VerdictAction) -> Result<(), BlockSeqError> {
        let end = self.end.as_mut().ok_or_else(|| end_missing(&self.id))?;
        end.set_verdict(verdict);
        Ok(())
    }

    pub fn build(self) -> Result<Level, BlockSeqError> {
        let LevelBuilder {
            id,
            title,
            start,
            end,
            mut slots,
            sources,
            bindings,
        } = self;

        let start = start.ok_or_else(|| start_missing(&id))?;
        let end = end.ok_or_else(|| end_missing(&id))?;

        slots.sort_by_key(DestinationSlot::row);
        let rows = slots.iter().map(DestinationSlot::row).collect::<Vec<_>>();
        let registry = SlotRegistry::new(&rows, bindings)?;

        let blocks = [start.block(), end.block()]
            .into_iter()
            .chain(slots.iter().map(DestinationSlot::block))
            .chain(sources.iter().map(SourceBlock::block));
        for block in blocks {
            block.ensure_created()?;
        }

        if start.action().is_none() {
            return Err(action_missing(&id, "the start block"));
        }
        if end.verdict().is_none() {
            return Err(action_missing(&id, "the end block"));
        }
        if let Some(source) = sources.iter().find(|source| source.action().is_none()) {
            return Err(action_missing(&id, &format!("source {}", source.id())));
        }

        debug!(
            level = %id,
            rows = rows.len(),
            sources = sources.len(),
            "level built"
        );
        Ok(Level {
            id,
            title,
            board: Board::new(start, end, slots, sources, registry),
        })
    }
}

fn start_missing(id: &str) -> BlockSeqError {
    BlockSeqError::new(
        "LEVEL_START_MISSING",
        format!("Level \"{}\" has no start block.", id),
    )
}

fn end_missing(id: &str) -> BlockSeqError {
    BlockSeqError::new(
        "LEVEL_END_MISSING",
        format!("Level \"{}\" has no end block.", id),
    )
}

fn action_missing(id: &str, owner: &str) -> BlockSeqError {
    BlockSeqError::new(
        "LEVEL_ACTION_MISSING",
        format!("Level \"{}\": no action attached to {}.", id, owner),
    )
}
