use colored::Colorize;
use dt_history::{PerformRequest, TrackerConfig};

use crate::CheckArgs;

pub fn run(
    config: &TrackerConfig,
    character: &str,
    action: &str,
    args: &CheckArgs,
    notes: &str,
    marker: Option<&str>,
) -> Result<(), String> {
    let mut dt = super::open(config)?;

    let found = dt
        .catalog()
        .get(action)
        .ok_or_else(|| format!("unknown action: {action}"))?;

    let mut request = PerformRequest::new(character, action).with_notes(notes);
    match found.check {
        Some(kind) => request = request.with_check(super::build_spec(kind, args)?),
        None => {
            let flags = super::given_flags(args);
            if !flags.is_empty() {
                return Err(format!(
                    "action '{}' does not take a check: remove {}",
                    found.name,
                    flags.join(", ")
                ));
            }
        }
    }
    if let Some(name) = marker {
        let id = dt
            .markers()
            .find(name)
            .ok_or_else(|| format!("marker not found: {name}"))?
            .id;
        request = request.in_marker(id);
    }

    let mut source = config.engine().source();
    let entry = dt
        .perform(request, &mut source)
        .map_err(|e| e.to_string())?;

    let outcome = match entry.tier {
        Some(tier) => super::tier_label(tier),
        None => entry.outcome_label().normal(),
    };
    println!("  {} {}: {outcome}", entry.character.as_str().bold(), entry.action);
    if let Some(check) = &entry.check {
        super::print_check(check);
    }
    Ok(())
}
