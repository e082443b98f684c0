use bs_core::{Point, SourceId};

use crate::board::Board;
use crate::controller::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Press { point: Point, button: PointerButton },
    Move { point: Point },
    Release { point: Point },
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    source: SourceId,
    offset: (f32, f32),
    hover: Option<usize>,
}

#[derive(Debug, Default)]
pub struct PointerRouter {
    grab: Option<Grab>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.grab = None;
    }

    pub fn route(&mut self, board: &Board, input: PointerInput) -> Vec<PointerEvent> {
        match input {
            PointerInput::Press { point, button } => self.press(board, point, button),
            PointerInput::Move { point } => self.moved(board, point),
            PointerInput::Release { point } => self.release(board, point),
        }
    }

    fn press(&mut self, board: &Board, point: Point, button: PointerButton) -> Vec<PointerEvent> {
        if self.grab.is_some() {
            return Vec::new();
        }
        let Some(source) = board.source_at(point) else {
            return Vec::new();
        };
        match button {
            PointerButton::Secondary => vec![PointerEvent::Detach { source }],
            PointerButton::Primary => {
                let position = board
                    .source(source)
                    .map(|block| block.position())
                    .unwrap_or(point);
                self.grab = Some(Grab {
                    source,
                    offset: point.offset_from(position),
                    hover: None,
                });
                vec![PointerEvent::DragStart {
                    source,
                    pointer: position,
                }]
            }
        }
    }

    fn moved(&mut self, board: &Board, point: Point) -> Vec<PointerEvent> {
        let Some(grab) = self.grab.as_mut() else {
            return Vec::new();
        };
        let source = grab.source;
        let pointer = point.translated(-grab.offset.0, -grab.offset.1);
        let mut events = vec![PointerEvent::Drag { source, pointer }];

        let zone = board.zone_at(point);
        if zone != grab.hover {
            if let Some(left) = grab.hover {
                events.push(PointerEvent::DragLeave {
                    source,
                    pointer,
                    zone: left,
                });
            }
            if let Some(entered) = zone {
                events.push(PointerEvent::DragEnter {
                    source,
                    pointer,
                    zone: entered,
                });
            }
            grab.hover = zone;
        }
        events
    }

    fn release(&mut self, board: &Board, point: Point) -> Vec<PointerEvent> {
        let Some(grab) = self.grab.take() else {
            return Vec::new();
        };
        let source = grab.source;
        let pointer = point.translated(-grab.offset.0, -grab.offset.1);
        match board.zone_at(point) {
            Some(zone) => vec![
                PointerEvent::Drop {
                    source,
                    pointer,
                    zone,
                },
                PointerEvent::DragEnd {
                    source,
                    pointer,
                    dropped: true,
                },
            ],
            None => vec![PointerEvent::DragEnd {
                source,
                pointer,
                dropped: false,
            }],
        }
    }
}
