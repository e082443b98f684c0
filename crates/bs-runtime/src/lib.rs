mod action;
mod block;
mod board;
mod controller;
mod engine;
mod level;
mod pointer;
mod registry;
mod sequence;
mod session;
mod slot;
mod source;
mod store;

pub use action::{variable_action, verdict_action, VariableAction, VerdictAction};
pub use block::{Block, EndBlock, StartBlock};
pub use board::{Board, Placement};
pub use controller::{ControllerResponse, DragController, DragEffect, DragPhase, PointerEvent};
pub use engine::{ExecutionEngine, ExecutionReport};
pub use level::{Level, LevelBuilder};
pub use pointer::{PointerButton, PointerInput, PointerRouter};
pub use registry::{validate_rows, SlotRegistry};
pub use sequence::{Instruction, InstructionSequence};
pub use session::PuzzleSession;
pub use slot::DestinationSlot;
pub use source::SourceBlock;
pub use store::VariableStore;
