use comfy_table::{ContentArrangement, Table};
use dt_history::TrackerConfig;

pub fn run(config: &TrackerConfig, character: &str, format: &str) -> Result<(), String> {
    let dt = super::open(config)?;
    let history = dt.history();
    let entries = history.entries_for(character);

    match format {
        "markdown" | "md" => print!("{}", history.export_markdown(character, dt.markers())),
        "text" | "txt" => print!("{}", history.export_text(character, dt.markers())),
        "json" => {
            let text = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
            println!("{text}");
        }
        "table" => {
            if entries.is_empty() {
                println!("  No history for {character}.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Date", "Action", "Outcome", "Marker", "Notes"]);

            for entry in entries {
                let marker = entry
                    .marker
                    .and_then(|id| dt.markers().get(id))
                    .map_or_else(|| "—".to_string(), |m| m.name.clone());
                let outcome = match &entry.check {
                    Some(check) if check.would_change() => {
                        let potential = check.potential.as_ref().map_or("", |p| p.tier.label());
                        format!("{} (→ {potential})", entry.outcome_label())
                    }
                    _ => entry.outcome_label().to_string(),
                };
                let notes = if entry.notes.len() > 60 {
                    format!("{}...", entry.notes.chars().take(57).collect::<String>())
                } else {
                    entry.notes.clone()
                };
                table.add_row(vec![
                    entry.timestamp.format("%Y-%m-%d").to_string(),
                    entry.action.clone(),
                    outcome,
                    marker,
                    notes,
                ]);
            }

            println!("{table}");
            println!();
            let successes = entries.iter().filter(|e| e.success).count();
            println!("  {} entries, {successes} successful", entries.len());
        }
        other => {
            return Err(format!(
                "unknown format '{other}': expected table, markdown, text, or json"
            ));
        }
    }
    Ok(())
}
