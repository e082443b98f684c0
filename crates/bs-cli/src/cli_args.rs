use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blockseq")]
#[command(about = "Assemble programs by dragging blocks into slots")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Tui(TuiArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Play(PlayArgs),
    Inspect(InspectArgs),
    Levels(LevelsArgs),
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub(crate) struct LevelSelector {
    #[arg(long = "level-file")]
    pub(crate) level_file: Option<String>,
    #[arg(long = "level")]
    pub(crate) level: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[command(flatten)]
    pub(crate) selector: LevelSelector,
    #[arg(long = "move")]
    pub(crate) moves: Vec<String>,
    #[arg(long = "max-operations")]
    pub(crate) max_operations: Option<u64>,
}

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    #[command(flatten)]
    pub(crate) selector: LevelSelector,
}

#[derive(Debug, Args)]
pub(crate) struct LevelsArgs {
    #[arg(long = "levels-dir")]
    pub(crate) levels_dir: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct TuiArgs {
    #[arg(long = "levels-dir")]
    pub(crate) levels_dir: Option<String>,
    #[arg(long = "level")]
    pub(crate) level: Option<String>,
    #[arg(long = "line")]
    pub(crate) line: bool,
    #[arg(long = "log-file")]
    pub(crate) log_file: Option<String>,
}
