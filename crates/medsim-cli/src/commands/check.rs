use std::path::Path;

use medsim_engine::resolve_command;

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = super::load_scenario(Some(path))?;
    let state = &scenario.initial_state;

    let broken: Vec<String> = scenario
        .perfect_actions
        .iter()
        .chain(&scenario.bad_actions)
        .filter_map(|action| {
            resolve_command(action, state)
                .err()
                .map(|e| format!("  '{action}': {e}"))
        })
        .collect();
    if !broken.is_empty() {
        for line in &broken {
            eprintln!("{line}");
        }
        return Err(format!("{} reference action(s) do not parse", broken.len()));
    }

    println!("  All checks passed for '{}'.", scenario.title);
    println!(
        "  {} body parts, {} ailments, {} key actions, {} bad actions",
        state.patient.body_parts.len(),
        state.patient.ailments.len(),
        scenario.perfect_actions.len(),
        scenario.bad_actions.len()
    );

    Ok(())
}
