use std::sync::Arc;

use colored::Colorize;

use medsim_core::sample::fall_from_ledge;
use medsim_engine::Session;
use medsim_grading::grade_scenario;

pub fn run(nlp: bool) -> Result<(), String> {
    let scenario = fall_from_ledge();
    let mut session = Session::from_scenario(&scenario);
    if nlp {
        let classifier = super::train_classifier(0.7)?;
        session = session.with_classifier(Arc::new(classifier));
    }

    println!("  {} {}", "Scenario:".bold(), scenario.title);
    println!("  {}\n", scenario.summary);

    for action in &scenario.perfect_actions {
        println!("> {}", action.cyan());
        let turn = session.process(action);
        super::print_turn(&turn);
    }

    let state = session.into_state();
    super::grade::print_report(&grade_scenario(&scenario, &state));
    Ok(())
}
