use comfy_table::{ContentArrangement, Table};
use dt_history::TrackerConfig;

pub fn run(config: &TrackerConfig) -> Result<(), String> {
    let dt = super::open(config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Action", "Check", "Description"]);

    for action in dt.catalog().iter() {
        let check = action
            .check
            .map_or_else(|| "none".to_string(), |kind| kind.to_string());
        table.add_row(vec![action.name.clone(), check, action.description.clone()]);
    }

    println!("{table}");
    println!();
    println!("  {} actions", dt.catalog().len());
    Ok(())
}
