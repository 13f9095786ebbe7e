use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use medsim_grading::{GradeReport, LetterGrade, grade_scenario};

pub fn run(state: &Path, scenario: Option<&Path>, json: bool) -> Result<(), String> {
    let scenario = super::load_scenario(scenario)?;
    let state = super::load_state(state)?;
    let report = grade_scenario(&scenario, &state);

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Print a grade report as a table followed by its feedback.
pub(super) fn print_report(report: &GradeReport) {
    let letter = report.letter();
    let colored_letter = match letter {
        LetterGrade::A | LetterGrade::B => letter.to_string().green().bold(),
        LetterGrade::C | LetterGrade::D => letter.to_string().yellow().bold(),
        LetterGrade::F => letter.to_string().red().bold(),
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Measure", "Result"]);
    table.add_row(vec!["Score".to_string(), format!("{:.0}", report.score)]);
    table.add_row(vec!["Grade".to_string(), colored_letter.to_string()]);
    table.add_row(vec![
        "Key actions".to_string(),
        format!(
            "{}/{}",
            report.matched_actions, report.total_perfect_actions
        ),
    ]);
    table.add_row(vec![
        "Bad actions".to_string(),
        report.bad_actions_count.to_string(),
    ]);
    table.add_row(vec![
        "Order bonus".to_string(),
        format!("{:+.0}", report.order_bonus),
    ]);

    println!("{table}");
    for line in &report.feedback {
        println!("  {line}");
    }
}
