//! Human-readable battle output.
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use battle_core::{ActorIndex, BattleAction, BattleLog, BattleResult, EffectRecord, Side};

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Outcome, participants, and one line per action
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

pub fn print_log(log: &BattleLog, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Summary => print_summary(log),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(log).context("Failed to serialize log to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Debug => println!("{:#?}", log),
    }
    Ok(())
}

/// Final standing of every combatant.
pub fn print_standings(result: &BattleResult, log: &BattleLog) {
    let names = names(log);
    println!();
    println!("=== Standings ===");
    for side in [Side::Player, Side::Enemy] {
        let alive = result.survivors(side).count();
        println!("{side}: {alive} standing");
        for combatant in result.combatants.iter().filter(|combatant| combatant.side == side) {
            let statuses = if combatant.statuses.is_empty() {
                String::new()
            } else {
                let ids: Vec<String> = combatant.statuses.iter().map(ToString::to_string).collect();
                format!(" [{}]", ids.join(", "))
            };
            println!(
                "  {:<16} {:>5}/{:<5}{}",
                name_of(&names, combatant.index),
                combatant.hp,
                combatant.max_hp,
                statuses
            );
        }
    }
}

fn print_summary(log: &BattleLog) {
    let names = names(log);

    println!("=== Battle Summary ===");
    println!("Outcome: {:?} after {} turn(s)", log.outcome, log.turns);
    println!();

    println!("Participants:");
    for participant in log.players.iter().chain(&log.enemies) {
        let hp = log.initial_hp_of(participant.actor).unwrap_or(participant.max_hp);
        println!(
            "  {} {:<16} HP {:>5}/{:<5}",
            participant.actor, participant.name, hp, participant.max_hp
        );
    }
    println!();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in log.action_entries() {
        *counts.entry(format!("{:?}", entry.kind())).or_default() += 1;
    }
    println!("Actions:");
    for (kind, count) in &counts {
        println!("  {:<16} {}", kind, count);
    }
    println!();

    let mut current_turn = None;
    for entry in &log.entries {
        if current_turn != Some(entry.turn) {
            current_turn = Some(entry.turn);
            println!("--- Turn {} ---", entry.turn);
        }
        println!("{}", describe_entry(entry, &names));
    }
}

fn describe_entry(entry: &BattleAction, names: &BTreeMap<ActorIndex, String>) -> String {
    let actor = entry
        .actor
        .map(|index| name_of(names, index))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!("  {:<16} {:?}", actor, entry.kind());
    if let Some(skill) = entry.declaration.skill_index {
        line.push_str(&format!(" #{}", skill));
    }
    if entry.kind().is_outcome() {
        return line;
    }
    for effect in &entry.effects {
        line.push_str("\n      ");
        line.push_str(&describe_effect(effect, names));
    }
    line
}

fn describe_effect(effect: &EffectRecord, names: &BTreeMap<ActorIndex, String>) -> String {
    let target = effect
        .target
        .map(|index| name_of(names, index))
        .unwrap_or_else(|| "-".to_string());
    let mut text = format!("{:?} -> {}", effect.kind, target);
    if effect.value != 0.0 {
        text.push_str(&format!(" {}", effect.value));
    }
    if let Some(status) = effect.status {
        text.push_str(&format!(" ({})", status));
    }
    let flags = effect.flags();
    if !flags.is_empty() {
        text.push_str(&format!(" {:?}", flags));
    }
    text
}

fn names(log: &BattleLog) -> BTreeMap<ActorIndex, String> {
    log.players
        .iter()
        .chain(&log.enemies)
        .map(|participant| (participant.actor, participant.name.clone()))
        .collect()
}

fn name_of(names: &BTreeMap<ActorIndex, String>, index: ActorIndex) -> String {
    names.get(&index).cloned().unwrap_or_else(|| index.to_string())
}
