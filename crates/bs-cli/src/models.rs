use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LevelOrigin {
    File(PathBuf),
    Builtin,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedLevel {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) json: String,
    pub(crate) origin: LevelOrigin,
}

impl LoadedLevel {
    pub(crate) fn origin_label(&self) -> String {
        match &self.origin {
            LevelOrigin::File(path) => path.display().to_string(),
            LevelOrigin::Builtin => "builtin".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AgentMove {
    Place { source: usize, row: usize },
    Detach { source: usize },
    Drag { source: usize, x: f32, y: f32 },
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineCommandAction {
    NotHandled,
    Continue,
    Refresh,
    Quit,
}
