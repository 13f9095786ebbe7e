use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use medsim_engine::realize_patient;

pub fn run(scenario: Option<&Path>, state: Option<&Path>) -> Result<(), String> {
    let state = match state {
        Some(path) => super::load_state(path)?,
        None => super::load_scenario(scenario)?.initial_state,
    };
    let patient = realize_patient(&state);

    println!("  {}, {}", state.patient.name, state.patient.age);

    let mut vitals = Table::new();
    vitals.set_content_arrangement(ContentArrangement::Dynamic);
    vitals.set_header(vec!["Vital", "Value"]);
    vitals.add_row(vec![
        "Pulse".to_string(),
        format!("{:.0} bpm, {}", patient.heart_rate, patient.pulse_rhythm),
    ]);
    vitals.add_row(vec![
        "Respirations".to_string(),
        format!(
            "{:.0} per minute, {}, {}",
            patient.respiratory_rate, patient.respiratory_rhythm, patient.respiratory_effort
        ),
    ]);
    vitals.add_row(vec![
        "Skin".to_string(),
        format!(
            "{}, {}, {}",
            patient.skin_color, patient.skin_temperature, patient.skin_moisture
        ),
    ]);
    vitals.add_row(vec![
        "Pupils".to_string(),
        format!(
            "{}, {}, {}",
            patient.pupil_shape, patient.pupil_equality, patient.pupil_reactivity
        ),
    ]);
    vitals.add_row(vec![
        "Core temperature".to_string(),
        format!("{:.1} F", patient.core_temperature),
    ]);
    vitals.add_row(vec!["Bleeding".to_string(), patient.bleed.to_string()]);
    vitals.add_row(vec![
        "Responsiveness".to_string(),
        patient.responsiveness.to_string(),
    ]);
    vitals.add_row(vec![
        "Position".to_string(),
        patient.position.describe().to_string(),
    ]);
    println!("{vitals}");

    let mut parts = Table::new();
    parts.set_content_arrangement(ContentArrangement::Dynamic);
    parts.set_header(vec![
        "Part",
        "Motion",
        "Circulation",
        "Sensation",
        "Exposure",
        "Findings",
    ]);
    for part in &patient.parts {
        parts.add_row(vec![
            part.name.clone(),
            part.motion.to_string(),
            part.kind
                .circulation()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".into()),
            part.kind
                .sensation()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".into()),
            part.obstruction.to_string(),
            part.findings.join(" "),
        ]);
    }
    println!("{parts}");

    Ok(())
}
