use comfy_table::{ContentArrangement, Table};
use dt_history::TrackerConfig;

pub fn add(config: &TrackerConfig, name: &str, description: &str) -> Result<(), String> {
    let mut dt = super::open(config)?;
    dt.add_marker(name, description)
        .map_err(|e| e.to_string())?;
    println!("  Added marker '{}'", name.trim());
    Ok(())
}

pub fn list(config: &TrackerConfig) -> Result<(), String> {
    let dt = super::open(config)?;
    let markers = dt.markers();

    if markers.is_empty() {
        println!("  No markers yet.");
        return Ok(());
    }

    let current = markers.current().map(|m| m.id);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Started", "Entries", "Description"]);

    for marker in markers.iter() {
        let name = if Some(marker.id) == current {
            format!("{} (current)", marker.name)
        } else {
            marker.name.clone()
        };
        let entries = dt.history().entries_in_marker(marker.id).len();
        table.add_row(vec![
            name,
            marker.started.format("%Y-%m-%d %H:%M").to_string(),
            entries.to_string(),
            marker.description.clone(),
        ]);
    }

    println!("{table}");
    Ok(())
}
