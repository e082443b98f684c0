use bs_core::BlockSeqError;

const BUILTIN_LEVELS: &[(&str, &str)] = &[
    (
        "assign-and-add",
        include_str!("../../../levels/basics/assign-and-add.level.json"),
    ),
    ("swap", include_str!("../../../levels/basics/swap.level.json")),
];

pub fn builtin_level_ids() -> Vec<&'static str> {
    BUILTIN_LEVELS.iter().map(|(id, _)| *id).collect()
}

pub fn builtin_level_json(id: &str) -> Result<&'static str, BlockSeqError> {
    BUILTIN_LEVELS
        .iter()
        .find(|(builtin, _)| *builtin == id)
        .map(|(_, json)| *json)
        .ok_or_else(|| {
            BlockSeqError::new(
                "LEVEL_BUILTIN_UNKNOWN",
                format!(
                    "No built-in level \"{}\". Known: {}.",
                    id,
                    builtin_level_ids().join(", ")
                ),
            )
        })
}
