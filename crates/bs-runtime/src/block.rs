use std::fmt;

use bs_core::{BlockKind, BlockSeqError, Point, Rect, Size};

use crate::action::{VariableAction, VerdictAction};

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    kind: BlockKind,
    position: Point,
    size: Size,
    text: String,
    interactive: bool,
    created: bool,
}

impl Block {
    pub fn new(kind: BlockKind, position: Point) -> Self {
        Self {
            kind,
            position,
            size: Size::block(),
            text: String::new(),
            interactive: false,
            created: false,
        }
    }

    pub fn create(&mut self, text: &str) -> Result<(), BlockSeqError> {
        if self.created {
            return Err(BlockSeqError::new(
                "BLOCK_ALREADY_CREATED",
                format!(
                    "{:?} block at ({}, {}) was already created.",
                    self.kind, self.position.x, self.position.y
                ),
            ));
        }
        self.text = text.to_string();
        self.size = Size::block();
        self.interactive = true;
        self.created = true;
        Ok(())
    }

    pub fn update(&mut self) {}

    pub fn ensure_created(&self) -> Result<(), BlockSeqError> {
        if self.created {
            return Ok(());
        }
        Err(BlockSeqError::new(
            "BLOCK_NOT_CREATED",
            format!(
                "{:?} block at ({}, {}) is used before create().",
                self.kind, self.position.x, self.position.y
            ),
        ))
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn texture(&self) -> &'static str {
        self.kind.texture()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }
}

pub struct StartBlock {
    block: Block,
    action: Option<VariableAction>,
}

impl StartBlock {
    pub fn new(position: Point) -> Self {
        Self {
            block: Block::new(BlockKind::Start, position),
            action: None,
        }
    }

    pub fn create(&mut self, text: &str) -> Result<(), BlockSeqError> {
        self.block.create(text)
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn action(&self) -> Option<&VariableAction> {
        self.action.as_ref()
    }

    pub(crate) fn set_action(&mut self, action: VariableAction) {
        self.action = Some(action);
    }
}

impl fmt::Debug for StartBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartBlock")
            .field("block", &self.block)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

pub struct EndBlock {
    block: Block,
    verdict: Option<VerdictAction>,
}

impl EndBlock {
    pub fn new(position: Point) -> Self {
        Self {
            block: Block::new(BlockKind::End, position),
            verdict: None,
        }
    }

    pub fn create(&mut self, text: &str) -> Result<(), BlockSeqError> {
        self.block.create(text)
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn verdict(&self) -> Option<&VerdictAction> {
        self.verdict.as_ref()
    }

    pub(crate) fn set_verdict(&mut self, verdict: VerdictAction) {
        self.verdict = Some(verdict);
    }
}

impl fmt::Debug for EndBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndBlock")
            .field("block", &self.block)
            .field("has_verdict", &self.verdict.is_some())
            .finish()
    }
}
