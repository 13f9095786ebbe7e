use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(text: &str, threshold: f64, json: bool) -> Result<(), String> {
    let classifier = super::train_classifier(threshold)?;
    let classification = classifier.classify(text);
    let canonical = classifier.to_canonical(&classification);

    if json {
        let value = serde_json::json!({
            "classification": classification,
            "canonical": canonical,
        });
        let out = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    if classification.ranking.is_empty() {
        println!("  No recognizable words.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Intent", "Confidence"]);
        for (intent, p) in &classification.ranking {
            table.add_row(vec![intent.clone(), format!("{:.1}%", p * 100.0)]);
        }
        println!("{table}");
    }

    if !classification.entities.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Entity", "Value", "Match"]);
        for entity in &classification.entities {
            table.add_row(vec![
                entity.kind.to_string(),
                entity.value.clone(),
                if entity.fuzzy { "fuzzy" } else { "exact" }.to_string(),
            ]);
        }
        println!("{table}");
    }

    if canonical.was_nlp_parsed {
        println!("  Canonical: {}", canonical.text.green().bold());
    } else {
        println!(
            "  {}",
            format!(
                "Below the {:.0}% threshold; input is parsed as typed: {}",
                threshold * 100.0,
                canonical.text
            )
            .yellow()
        );
    }
    Ok(())
}
