use bs_core::{BlockSeqError, FillState, Point, SourceId};
use tracing::info;

use crate::board::Board;
use crate::controller::{ControllerResponse, DragController, DragPhase, PointerEvent};
use crate::engine::{ExecutionEngine, ExecutionReport};
use crate::level::Level;
use crate::pointer::{PointerInput, PointerRouter};
use crate::store::VariableStore;

#[derive(Debug)]
pub struct PuzzleSession {
    id: String,
    title: String,
    board: Board,
    engine: ExecutionEngine,
    controller: DragController,
    router: PointerRouter,
}

impl PuzzleSession {
    pub fn new(level: Level) -> Result<Self, BlockSeqError> {
        let Level { id, title, board } = level;
        let mut session = Self {
            id,
            title,
            board,
            engine: ExecutionEngine::new(),
            controller: DragController::new(),
            router: PointerRouter::new(),
        };
        // Start values are visible before the first move.
        session.execute()?;
        info!(level = %session.id, rows = session.board.row_count(), "session started");
        Ok(session)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &VariableStore {
        self.engine.store()
    }

    pub fn last_report(&self) -> Option<&ExecutionReport> {
        self.engine.last_report()
    }

    pub fn fill_state(&self) -> FillState {
        self.board.fill_state()
    }

    pub fn phase(&self) -> DragPhase {
        self.controller.phase()
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> Result<ControllerResponse, BlockSeqError> {
        self.controller
            .handle(event, &mut self.board, &mut self.engine)
    }

    pub fn pointer(
        &mut self,
        input: PointerInput,
    ) -> Result<Vec<ControllerResponse>, BlockSeqError> {
        let events = self.router.route(&self.board, input);
        self.dispatch_all(events)
    }

    pub fn place(
        &mut self,
        source: SourceId,
        row: usize,
    ) -> Result<Vec<ControllerResponse>, BlockSeqError> {
        let target = self.board.require_slot(row)?.position();
        self.ensure_idle()?;
        let start = self.board.require_source(source)?.position();
        self.dispatch_all(vec![
            PointerEvent::DragStart {
                source,
                pointer: start,
            },
            PointerEvent::Drag {
                source,
                pointer: target,
            },
            PointerEvent::DragEnter {
                source,
                pointer: target,
                zone: row,
            },
            PointerEvent::Drop {
                source,
                pointer: target,
                zone: row,
            },
            PointerEvent::DragEnd {
                source,
                pointer: target,
                dropped: true,
            },
        ])
    }

    pub fn detach(&mut self, source: SourceId) -> Result<ControllerResponse, BlockSeqError> {
        self.ensure_idle()?;
        self.dispatch(PointerEvent::Detach { source })
    }

    pub fn drag_to(
        &mut self,
        source: SourceId,
        point: Point,
    ) -> Result<Vec<ControllerResponse>, BlockSeqError> {
        self.ensure_idle()?;
        let start = self.board.require_source(source)?.position();
        let mut events = vec![
            PointerEvent::DragStart {
                source,
                pointer: start,
            },
            PointerEvent::Drag {
                source,
                pointer: point,
            },
        ];
        match self.board.zone_at(point) {
            Some(zone) => events.extend([
                PointerEvent::DragEnter {
                    source,
                    pointer: point,
                    zone,
                },
                PointerEvent::Drop {
                    source,
                    pointer: point,
                    zone,
                },
                PointerEvent::DragEnd {
                    source,
                    pointer: point,
                    dropped: true,
                },
            ]),
            None => events.push(PointerEvent::DragEnd {
                source,
                pointer: point,
                dropped: false,
            }),
        }
        self.dispatch_all(events)
    }

    pub fn execute(&mut self) -> Result<ExecutionReport, BlockSeqError> {
        self.engine.execute(&self.board)
    }

    pub fn restart(&mut self) -> Result<ExecutionReport, BlockSeqError> {
        self.controller.cancel(&mut self.board);
        self.router.reset();
        self.board.clear_all()?;
        info!(level = %self.id, "session restarted");
        self.execute()
    }

    pub fn update(&mut self) {
        self.board.update();
    }

    fn ensure_idle(&self) -> Result<(), BlockSeqError> {
        if self.controller.phase() != DragPhase::Idle {
            return Err(BlockSeqError::new(
                "SESSION_DRAG_ACTIVE",
                "A drag is already in progress.",
            ));
        }
        Ok(())
    }

    fn dispatch_all(
        &mut self,
        events: Vec<PointerEvent>,
    ) -> Result<Vec<ControllerResponse>, BlockSeqError> {
        events
            .into_iter()
            .map(|event| self.dispatch(event))
            .collect()
    }
}
