use bs_core::{BlockKind, BlockSeqError, Point, Rect, SourceId};

use crate::block::Block;

#[derive(Debug, Clone, PartialEq)]
pub struct DestinationSlot {
    block: Block,
    row: usize,
    zone: Option<Rect>,
    occupant: Option<SourceId>,
    highlighted: bool,
}

impl DestinationSlot {
    pub fn new(row: usize, position: Point) -> Self {
        Self {
            block: Block::new(BlockKind::Destination, position),
            row,
            zone: None,
            occupant: None,
            highlighted: false,
        }
    }

    pub fn create(&mut self, text: &str) -> Result<(), BlockSeqError> {
        self.block.create(text)?;
        self.zone = Some(self.block.bounds());
        Ok(())
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub(crate) fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn position(&self) -> Point {
        self.block.position()
    }

    pub fn zone(&self) -> Option<Rect> {
        self.zone
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.zone.map(|zone| zone.contains(point)).unwrap_or(false)
    }

    pub fn occupant(&self) -> Option<SourceId> {
        self.occupant
    }

    // Board::set_occupant keeps the sequence entry in step with this.
    pub(crate) fn set_occupant(&mut self, occupant: Option<SourceId>) -> Option<SourceId> {
        std::mem::replace(&mut self.occupant, occupant)
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn highlight(&mut self, on: bool) {
        self.highlighted = on;
    }
}

#[cfg(test)]
mod slot_tests {
    use super::*;

    #[test]
    fn hit_test_requires_create_and_uses_block_bounds() {
        let mut slot = DestinationSlot::new(1, Point::new(200.0, 150.0));
        assert!(!slot.hit_test(Point::new(200.0, 150.0)));

        slot.create("// Drag a Source Block here.")
            .expect("create should pass");
        assert!(slot.hit_test(Point::new(200.0, 150.0)));
        assert!(slot.hit_test(Point::new(76.0, 113.0)));
        assert!(!slot.hit_test(Point::new(450.0, 150.0)));
    }

    #[test]
    fn set_occupant_returns_previous_value() {
        let mut slot = DestinationSlot::new(2, Point::new(200.0, 225.0));
        slot.create("").expect("create");
        assert_eq!(slot.set_occupant(Some(SourceId(1))), None);
        assert_eq!(slot.set_occupant(Some(SourceId(2))), Some(SourceId(1)));
        assert_eq!(slot.occupant(), Some(SourceId(2)));
        assert_eq!(slot.set_occupant(None), Some(SourceId(2)));
        assert_eq!(slot.occupant(), None);
    }

    #[test]
    fn highlight_toggles() {
        let mut slot = DestinationSlot::new(1, Point::new(0.0, 0.0));
        slot.highlight(true);
        assert!(slot.is_highlighted());
        slot.highlight(false);
        assert!(!slot.is_highlighted());
    }
}
