pub mod actions;
pub mod history;
pub mod marker;
pub mod perform;
pub mod roll;

use colored::{ColoredString, Colorize};
use dt_engine::{CheckKind, CheckResult, CheckSpec, Ledger, ResolvedRoll, Tier};
use dt_history::{Downtime, JsonFileStore, TrackerConfig};

use crate::CheckArgs;

/// Open the tracker stored at the configured path.
fn open(config: &TrackerConfig) -> Result<Downtime<JsonFileStore>, String> {
    let store = JsonFileStore::open(&config.store_path)
        .map_err(|e| format!("cannot open {}: {e}", config.store_path.display()))?;
    Downtime::open(store).map_err(|e| e.to_string())
}

/// Check flags present on the command line.
fn given_flags(args: &CheckArgs) -> Vec<&'static str> {
    [
        args.accuracy.map(|_| "--accuracy"),
        args.difficulty.map(|_| "--difficulty"),
        args.size.map(|_| "--size"),
        (!args.conditionals.is_empty()).then_some("--cond"),
        args.reason.as_ref().map(|_| "--reason"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Build a check specification of `kind` from command-line arguments.
///
/// Flags that belong to the other kind of check are rejected.
fn build_spec(kind: CheckKind, args: &CheckArgs) -> Result<CheckSpec, String> {
    let stray: Vec<&str> = match kind {
        CheckKind::ThresholdRoll => args.size.map(|_| "--size").into_iter().collect(),
        CheckKind::SuccessPool => [
            args.accuracy.map(|_| "--accuracy"),
            args.difficulty.map(|_| "--difficulty"),
        ]
        .into_iter()
        .flatten()
        .collect(),
    };
    if !stray.is_empty() {
        return Err(format!(
            "{} does not apply to a {kind} check",
            stray.join(", ")
        ));
    }

    let mut ledger = Ledger::new();
    for raw in &args.conditionals {
        let (magnitude, reason) = raw
            .split_once(':')
            .ok_or_else(|| format!("invalid conditional '{raw}': expected MAGNITUDE:REASON"))?;
        let magnitude: u32 = magnitude
            .trim()
            .parse()
            .map_err(|_| format!("invalid conditional magnitude '{magnitude}'"))?;
        ledger
            .propose(magnitude, reason)
            .map_err(|e| e.to_string())?;
    }

    let spec = match kind {
        CheckKind::ThresholdRoll => CheckSpec::threshold(
            args.accuracy.unwrap_or(0),
            args.difficulty.unwrap_or(0),
        )
        .map_err(|e| e.to_string())?,
        CheckKind::SuccessPool => CheckSpec::new(CheckKind::SuccessPool, args.size.unwrap_or(0)),
    }
    .with_conditionals(ledger.snapshot());

    Ok(match &args.reason {
        Some(reason) => spec.with_reason(reason.as_str()),
        None => spec,
    })
}

fn tier_label(tier: Tier) -> ColoredString {
    match tier {
        Tier::Triumph => tier.label().green().bold(),
        Tier::Success => tier.label().green(),
        Tier::Conflict => tier.label().yellow(),
        Tier::Disaster => tier.label().red().bold(),
    }
}

fn roll_line(roll: &ResolvedRoll) -> String {
    let faces: Vec<String> = roll.dice.iter().map(|v| v.to_string()).collect();
    format!(
        "{} [{}] = {}  {}",
        roll.formula,
        faces.join(", "),
        roll.total,
        tier_label(roll.tier)
    )
}

/// Print the confirmed and potential sections of a check.
fn print_check(check: &CheckResult) {
    if let Some(primary) = check.primary {
        println!("  {} {primary}", "d20:".dimmed());
    }
    if let Some(reason) = &check.reason {
        println!("  {} {reason}", "Reason:".dimmed());
    }
    println!("  {} {}", "Confirmed:".bold(), roll_line(&check.confirmed));
    if let Some(potential) = &check.potential {
        let change = if check.would_change() {
            "would change"
        } else {
            "no change"
        };
        println!(
            "  {} {} {}",
            "Potential:".bold(),
            roll_line(potential),
            format!("({change})").dimmed()
        );
        for modifier in &check.conditionals {
            println!("    {modifier}");
        }
    }
}
