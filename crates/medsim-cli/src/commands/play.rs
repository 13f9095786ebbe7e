use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use medsim_engine::Session;
use medsim_grading::grade_scenario;

const HELP: &str = "\
  Commands are a verb followed by a target, e.g. 'look patient', 'measure pulse',
  'apply splint leftLeg'. Plain English works too unless --no-nlp was given.

  :note <text>   record a note
  :help          show this help
  :quit          end the session and show the grade";

pub fn run(
    scenario: Option<&Path>,
    nlp: bool,
    threshold: f64,
    save: Option<&Path>,
) -> Result<(), String> {
    let scenario = super::load_scenario(scenario)?;
    let mut session = Session::from_scenario(&scenario);
    if nlp {
        let classifier = super::train_classifier(threshold)?;
        session = session.with_classifier(Arc::new(classifier));
    }

    println!("  {} {}", "Scenario:".bold(), scenario.title);
    if !scenario.summary.is_empty() {
        println!("  {}", scenario.summary);
    }
    println!("  Type ':help' for commands, ':quit' to finish.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ":quit" | ":q" => break,
            ":help" | ":h" => println!("{HELP}\n"),
            _ => {
                if let Some(note) = input.strip_prefix(":note") {
                    let note = note.trim();
                    if note.is_empty() {
                        println!("{}\n", "Usage: :note <text>".yellow());
                    } else {
                        session.note(note);
                        println!("{}\n", "Noted.".dimmed());
                    }
                } else {
                    let turn = session.process(input);
                    super::print_turn(&turn);
                }
            }
        }
    }

    let state = session.into_state();
    println!();
    super::grade::print_report(&grade_scenario(&scenario, &state));

    if let Some(path) = save {
        let json = state.to_json().map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!("\n  Session saved to {}", path.display());
    }

    Ok(())
}
