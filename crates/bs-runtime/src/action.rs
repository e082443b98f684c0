use std::rc::Rc;

use bs_core::{BlockSeqError, Verdict};

use crate::store::VariableStore;

pub type VariableAction = Rc<dyn Fn(&mut VariableStore) -> Result<(), BlockSeqError>>;

pub type VerdictAction = Rc<dyn Fn(&VariableStore) -> Result<Verdict, BlockSeqError>>;

pub fn variable_action<F>(action: F) -> VariableAction
where
    F: Fn(&mut VariableStore) -> Result<(), BlockSeqError> + 'static,
{
    Rc::new(action)
}

pub fn verdict_action<F>(action: F) -> VerdictAction
where
    F: Fn(&VariableStore) -> Result<Verdict, BlockSeqError> + 'static,
{
    Rc::new(action)
}
