use bs_core::{BlockSeqError, Point, SourceId};
use tracing::{debug, warn};

use crate::board::Board;
use crate::engine::{ExecutionEngine, ExecutionReport};
use crate::slot::DestinationSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    HoveringValid,
    HoveringInvalid,
}

impl DragPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::HoveringValid => "hoveringValid",
            Self::HoveringInvalid => "hoveringInvalid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    DragStart {
        source: SourceId,
        pointer: Point,
    },
    Drag {
        source: SourceId,
        pointer: Point,
    },
    DragEnter {
        source: SourceId,
        pointer: Point,
        zone: usize,
    },
    DragLeave {
        source: SourceId,
        pointer: Point,
        zone: usize,
    },
    Drop {
        source: SourceId,
        pointer: Point,
        zone: usize,
    },
    DragEnd {
        source: SourceId,
        pointer: Point,
        dropped: bool,
    },
    Detach { source: SourceId },
}

impl PointerEvent {
    pub fn source(&self) -> SourceId {
        match *self {
            Self::DragStart { source, .. }
            | Self::Drag { source, .. }
            | Self::DragEnter { source, .. }
            | Self::DragLeave { source, .. }
            | Self::Drop { source, .. }
            | Self::DragEnd { source, .. }
            | Self::Detach { source } => source,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "dragstart",
            Self::Drag { .. } => "drag",
            Self::DragEnter { .. } => "dragenter",
            Self::DragLeave { .. } => "dragleave",
            Self::Drop { .. } => "drop",
            Self::DragEnd { .. } => "dragend",
            Self::Detach { .. } => "detach",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    Ignored,
    Started,
    Moved,
    Previewed {
        zone: usize,
        evicted: Option<SourceId>,
    },
    HoverRejected {
        zone: usize,
    },
    Left {
        zone: usize,
        restored: Option<SourceId>,
    },
    Placed {
        zone: usize,
        evicted: Option<SourceId>,
    },
    DropRejected {
        zone: usize,
    },
    Returned,
    Detached {
        zone: usize,
    },
    Ended,
}

impl DragEffect {
    pub fn mutates_occupancy(&self) -> bool {
        matches!(self, Self::Placed { .. } | Self::Detached { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerResponse {
    pub phase: DragPhase,
    pub effect: DragEffect,
    pub execution: Option<ExecutionReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hover {
    None,
    Valid {
        zone: usize,
        previewed: Option<SourceId>,
    },
    Invalid {
        zone: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    source: SourceId,
    drag_start: Point,
    hover: Hover,
    settled: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        match self.active.map(|active| active.hover) {
            None => DragPhase::Idle,
            Some(Hover::None) => DragPhase::Dragging,
            Some(Hover::Valid { .. }) => DragPhase::HoveringValid,
            Some(Hover::Invalid { .. }) => DragPhase::HoveringInvalid,
        }
    }

    pub fn active_source(&self) -> Option<SourceId> {
        self.active.map(|active| active.source)
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        board: &mut Board,
        engine: &mut ExecutionEngine,
    ) -> Result<ControllerResponse, BlockSeqError> {
        board.require_source(event.source())?;
        let mut execution = None;

        let effect = match event {
            PointerEvent::DragStart { source, .. } => self.drag_start(source, board),
            PointerEvent::Drag { source, pointer } => self.drag(source, pointer, board),
            PointerEvent::DragEnter { source, zone, .. } => self.enter(source, zone, board)?,
            PointerEvent::DragLeave { source, zone, .. } => self.leave(source, zone, board)?,
            PointerEvent::Drop { source, zone, .. } => {
                let effect = self.drop(source, zone, board)?;
                if effect.mutates_occupancy() {
                    execution = Some(engine.execute(board)?);
                }
                effect
            }
            PointerEvent::DragEnd {
                source, dropped, ..
            } => {
                let effect = self.drag_end(source, dropped, board)?;
                if effect.mutates_occupancy() {
                    execution = Some(engine.execute(board)?);
                }
                effect
            }
            PointerEvent::Detach { source } => {
                if self.active.is_some() {
                    DragEffect::Ignored
                } else {
                    match board.detach(source)? {
                        Some(zone) => {
                            execution = Some(engine.execute(board)?);
                            DragEffect::Detached { zone }
                        }
                        None => DragEffect::Ignored,
                    }
                }
            }
        };

        if effect == DragEffect::Ignored {
            warn!(
                event = event.name(),
                source = %event.source(),
                phase = self.phase().label(),
                "pointer event ignored"
            );
        } else {
            debug!(
                event = event.name(),
                source = %event.source(),
                effect = ?effect,
                phase = self.phase().label(),
                "pointer event handled"
            );
        }

        Ok(ControllerResponse {
            phase: self.phase(),
            effect,
            execution,
        })
    }

    fn live(&self, source: SourceId) -> Option<ActiveDrag> {
        self.active
            .filter(|active| active.source == source && !active.settled)
    }

    fn drag_start(&mut self, source: SourceId, board: &mut Board) -> DragEffect {
        if self.active.is_some() {
            return DragEffect::Ignored;
        }
        let Some(block) = board.source_mut(source) else {
            return DragEffect::Ignored;
        };
        block.set_active(true);
        self.active = Some(ActiveDrag {
            source,
            drag_start: block.position(),
            hover: Hover::None,
            settled: false,
        });
        DragEffect::Started
    }

    fn drag(&mut self, source: SourceId, pointer: Point, board: &mut Board) -> DragEffect {
        if self.live(source).is_none() {
            return DragEffect::Ignored;
        }
        if let Some(block) = board.source_mut(source) {
            block.move_to(pointer);
        }
        DragEffect::Moved
    }

    fn enter(
        &mut self,
        source: SourceId,
        zone: usize,
        board: &mut Board,
    ) -> Result<DragEffect, BlockSeqError> {
        board.require_slot(zone)?;
        let Some(active) = self.live(source) else {
            return Ok(DragEffect::Ignored);
        };
        match active.hover {
            Hover::None => {}
            Hover::Valid { zone: current, .. } | Hover::Invalid { zone: current } => {
                if current == zone {
                    return Ok(DragEffect::Ignored);
                }
                self.leave(source, current, board)?;
            }
        }

        let bound = board.bound_row(source)?;
        let hover = if bound == zone {
            let previewed = board.occupant(zone).filter(|occupant| *occupant != source);
            if let Some(occupant) = previewed.and_then(|id| board.source_mut(id)) {
                occupant.reset_position();
            }
            if let Some(slot) = board.slot_mut(zone) {
                slot.highlight(true);
            }
            Hover::Valid { zone, previewed }
        } else {
            Hover::Invalid { zone }
        };
        self.set_hover(hover);

        Ok(match hover {
            Hover::Valid { zone, previewed } => DragEffect::Previewed {
                zone,
                evicted: previewed,
            },
            _ => DragEffect::HoverRejected { zone },
        })
    }

    fn leave(
        &mut self,
        source: SourceId,
        zone: usize,
        board: &mut Board,
    ) -> Result<DragEffect, BlockSeqError> {
        board.require_slot(zone)?;
        let Some(active) = self.active.filter(|active| active.source == source) else {
            return Ok(DragEffect::Ignored);
        };
        let restored = match active.hover {
            Hover::Valid {
                zone: current,
                previewed,
            } if current == zone => {
                let slot_position = board.require_slot(zone)?.position();
                if let Some(slot) = board.slot_mut(zone) {
                    slot.highlight(false);
                }
                // The preview only moved the occupant; put it back on the slot.
                let still_there = previewed.filter(|id| board.occupant(zone) == Some(*id));
                if let Some(occupant) = still_there.and_then(|id| board.source_mut(id)) {
                    occupant.move_to(slot_position);
                }
                still_there
            }
            Hover::Invalid { zone: current } if current == zone => None,
            _ => return Ok(DragEffect::Ignored),
        };
        self.set_hover(Hover::None);
        Ok(DragEffect::Left { zone, restored })
    }

    fn drop(
        &mut self,
        source: SourceId,
        zone: usize,
        board: &mut Board,
    ) -> Result<DragEffect, BlockSeqError> {
        board.require_slot(zone)?;
        let Some(active) = self.live(source) else {
            return Ok(DragEffect::Ignored);
        };
        match active.hover {
            Hover::Valid { zone: current, .. } if current == zone => {
                if let Some(slot) = board.slot_mut(zone) {
                    slot.highlight(false);
                }
                self.set_hover(Hover::None);
            }
            Hover::Valid { zone: current, .. } | Hover::Invalid { zone: current } => {
                self.leave(source, current, board)?;
            }
            Hover::None => {}
        }

        let effect = if board.bound_row(source)? == zone {
            let placement = board.place(source, zone)?;
            DragEffect::Placed {
                zone,
                evicted: placement.evicted,
            }
        } else {
            if let Some(block) = board.source_mut(source) {
                block.move_to(active.drag_start);
            }
            DragEffect::DropRejected { zone }
        };
        if let Some(active) = self.active.as_mut() {
            active.settled = true;
        }
        Ok(effect)
    }

    fn drag_end(
        &mut self,
        source: SourceId,
        dropped: bool,
        board: &mut Board,
    ) -> Result<DragEffect, BlockSeqError> {
        let Some(active) = self.active.filter(|active| active.source == source) else {
            return Ok(DragEffect::Ignored);
        };
        match active.hover {
            Hover::Valid { zone, .. } | Hover::Invalid { zone } => {
                self.leave(source, zone, board)?;
            }
            Hover::None => {}
        }
        let effect = if active.settled {
            DragEffect::Ended
        } else if dropped {
            // The host saw a drop this controller never got; leave occupancy alone.
            debug!(source = %source, "dragend reports a drop the controller did not see");
            let seated = board.registry().bound_row(source).and_then(|row| {
                board
                    .occupant(row)
                    .filter(|occupant| *occupant == source)
                    .and_then(|_| board.slot(row))
                    .map(DestinationSlot::position)
            });
            if let Some(block) = board.source_mut(source) {
                match seated {
                    Some(position) => block.move_to(position),
                    None => block.reset_position(),
                }
            }
            DragEffect::Ended
        } else {
            match board.detach(source)? {
                Some(zone) => DragEffect::Detached { zone },
                None => {
                    if let Some(block) = board.source_mut(source) {
                        block.reset_position();
                    }
                    DragEffect::Returned
                }
            }
        };
        if let Some(block) = board.source_mut(source) {
            block.set_active(false);
        }
        self.active = None;
        Ok(effect)
    }

    fn set_hover(&mut self, hover: Hover) {
        if let Some(active) = self.active.as_mut() {
            active.hover = hover;
        }
    }

    pub(crate) fn cancel(&mut self, board: &mut Board) {
        if let Some(active) = self.active.take() {
            if let Hover::Valid { zone, .. } = active.hover {
                if let Some(slot) = board.slot_mut(zone) {
                    slot.highlight(false);
                }
            }
            if let Some(block) = board.source_mut(active.source) {
                block.set_active(false);
            }
        }
    }
}
