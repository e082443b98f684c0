use bs_core::BlockSeqError;

use crate::{
    apply_move, create_session_for_level, emit_session_report, layout_lines, load_catalog,
    load_selected_level, map_cli_json, parse_agent_move, AgentArgs, AgentCommand, InspectArgs,
    LevelsArgs, PlayArgs,
};

pub(super) fn run_agent(args: AgentArgs) -> Result<i32, BlockSeqError> {
    match args.command {
        AgentCommand::Play(args) => run_play(args),
        AgentCommand::Inspect(args) => run_inspect(args),
        AgentCommand::Levels(args) => run_levels(args),
    }
}

pub(super) fn run_play(args: PlayArgs) -> Result<i32, BlockSeqError> {
    let level = load_selected_level(&args.selector)?;
    let moves = args
        .moves
        .iter()
        .map(|raw| parse_agent_move(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut session = create_session_for_level(&level, args.max_operations)?;
    let mut applied = Vec::with_capacity(moves.len());
    for agent_move in &moves {
        applied.push(apply_move(&mut session, agent_move)?);
    }

    let code = emit_session_report(&session)?;
    for (index, label) in applied.iter().enumerate() {
        println!("MOVE:{}:{}", index + 1, label);
    }
    Ok(code)
}

pub(super) fn run_inspect(args: InspectArgs) -> Result<i32, BlockSeqError> {
    let level = load_selected_level(&args.selector)?;
    let session = create_session_for_level(&level, None)?;
    for line in layout_lines(&level, &session)? {
        println!("{}", line);
    }
    Ok(0)
}

pub(super) fn run_levels(args: LevelsArgs) -> Result<i32, BlockSeqError> {
    let catalog = load_catalog(args.levels_dir.as_deref())?;
    println!("RESULT:OK");
    println!("COUNT:{}", catalog.len());
    for level in &catalog {
        println!(
            "LEVEL_ENTRY:{}:{}:{}",
            level.id,
            level.origin_label(),
            serde_json::to_string(&level.title).map_err(map_cli_json)?
        );
    }
    Ok(0)
}
