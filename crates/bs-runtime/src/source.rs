use std::fmt;

use bs_core::{BlockKind, BlockSeqError, Point, SourceId};

use crate::action::VariableAction;
use crate::block::Block;

pub struct SourceBlock {
    id: SourceId,
    block: Block,
    original: Point,
    action: Option<VariableAction>,
    active: bool,
}

impl SourceBlock {
    pub fn new(id: SourceId, position: Point) -> Self {
        Self {
            id,
            block: Block::new(BlockKind::Source, position),
            original: position,
            action: None,
            active: false,
        }
    }

    pub fn create(&mut self, text: &str) -> Result<(), BlockSeqError> {
        self.block.create(text)
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn position(&self) -> Point {
        self.block.position()
    }

    pub fn original_position(&self) -> Point {
        self.original
    }

    pub(crate) fn move_to(&mut self, position: Point) {
        self.block.set_position(position);
    }

    pub fn reset_position(&mut self) {
        self.block.set_position(self.original);
    }

    pub fn is_home(&self) -> bool {
        self.block.position() == self.original
    }

    pub fn action(&self) -> Option<&VariableAction> {
        self.action.as_ref()
    }

    pub(crate) fn set_action(&mut self, action: VariableAction) {
        self.action = Some(action);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl fmt::Debug for SourceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBlock")
            .field("id", &self.id)
            .field("block", &self.block)
            .field("original", &self.original)
            .field("has_action", &self.action.is_some())
            .field("active", &self.active)
            .finish()
    }
}
