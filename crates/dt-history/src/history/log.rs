//! History storage and export.

use std::collections::BTreeMap;

use dt_engine::CheckResult;
use serde::{Deserialize, Serialize};

use super::entry::HistoryEntry;
use crate::marker::{MarkerId, MarkerList};

/// Append-only downtime logs, one per character.
///
/// Character names are matched case-insensitively; each entry keeps the name
/// as it was entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    logs: BTreeMap<String, Vec<HistoryEntry>>,
}

fn key(character: &str) -> String {
    character.trim().to_lowercase()
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its character's log.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.logs.entry(key(&entry.character)).or_default().push(entry);
    }

    /// All entries for a character, oldest first.
    pub fn entries_for(&self, character: &str) -> &[HistoryEntry] {
        self.logs
            .get(&key(character))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every character's entries that belong to `marker`, ordered by time.
    pub fn entries_in_marker(&self, marker: MarkerId) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self
            .logs
            .values()
            .flatten()
            .filter(|e| e.marker == Some(marker))
            .collect();
        entries.sort_by_key(|e| e.timestamp);
        entries
    }

    /// Names of every character with at least one entry.
    pub fn characters(&self) -> Vec<&str> {
        self.logs
            .values()
            .filter_map(|log| log.first())
            .map(|e| e.character.as_str())
            .collect()
    }

    /// Total number of entries across all characters.
    pub fn len(&self) -> usize {
        self.logs.values().map(Vec::len).sum()
    }

    /// Whether no entries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export a character's log as markdown.
    pub fn export_markdown(&self, character: &str, markers: &MarkerList) -> String {
        let mut out = format!("# Downtime: {}\n\n", character.trim());
        let mut current: Option<MarkerId> = None;
        for entry in self.entries_for(character) {
            if entry.marker.is_some() && entry.marker != current {
                current = entry.marker;
                out.push_str(&format!("## {}\n\n", marker_name(markers, entry.marker)));
            }
            out.push_str(&format!(
                "**{}** ({}): **{}**\n",
                entry.action,
                entry.timestamp.format("%Y-%m-%d"),
                entry.outcome_label()
            ));
            if let Some(check) = &entry.check {
                push_check(&mut out, check, "  ");
            }
            if !entry.notes.is_empty() {
                out.push_str(&format!("> {}\n", entry.notes));
            }
            out.push('\n');
        }
        out
    }

    /// Export a character's log as plain text.
    pub fn export_text(&self, character: &str, markers: &MarkerList) -> String {
        let title = format!("Downtime: {}", character.trim());
        let mut out = format!("{title}\n{}\n\n", "=".repeat(title.chars().count()));
        let mut current: Option<MarkerId> = None;
        for entry in self.entries_for(character) {
            if entry.marker.is_some() && entry.marker != current {
                current = entry.marker;
                out.push_str(&format!("--- {} ---\n", marker_name(markers, entry.marker)));
            }
            out.push_str(&format!(
                "{} [{}]: {}\n",
                entry.action,
                entry.timestamp.format("%Y-%m-%d"),
                entry.outcome_label()
            ));
            if let Some(check) = &entry.check {
                push_check(&mut out, check, "  ");
            }
            if !entry.notes.is_empty() {
                out.push_str(&format!("  Notes: {}\n", entry.notes));
            }
            out.push('\n');
        }
        out
    }
}

fn marker_name(markers: &MarkerList, id: Option<MarkerId>) -> String {
    match id {
        Some(id) => markers
            .get(id)
            .map_or_else(|| format!("Marker {id}"), |m| m.name.clone()),
        None => String::new(),
    }
}

fn push_check(out: &mut String, check: &CheckResult, indent: &str) {
    if let Some(primary) = check.primary {
        out.push_str(&format!("{indent}d20: {primary}\n"));
    }
    out.push_str(&format!("{indent}Confirmed: {}\n", check.confirmed));
    if let Some(potential) = &check.potential {
        out.push_str(&format!("{indent}If approved: {potential}\n"));
        for modifier in &check.conditionals {
            out.push_str(&format!("{indent}  {modifier}\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dt_engine::{CheckSpec, Ledger, ScriptedSource, Tier, execute};

    fn flat_check(face: u32) -> CheckResult {
        let mut source = ScriptedSource::new([face]);
        execute(CheckSpec::threshold(0, 0).unwrap(), &mut source).unwrap()
    }

    #[test]
    fn empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.entries_for("Ash").is_empty());
        assert!(history.characters().is_empty());
    }

    #[test]
    fn record_groups_by_character() {
        let mut history = History::new();
        history.record(HistoryEntry::new("Ash", "Get Focused", "", None, None));
        history.record(HistoryEntry::new("ash", "Get Creative", "", None, Some(flat_check(12))));
        history.record(HistoryEntry::new("Vel", "Get Focused", "", None, None));

        assert_eq!(history.len(), 3);
        let ash = history.entries_for("ASH");
        assert_eq!(ash.len(), 2);
        assert_eq!(ash[0].action, "Get Focused");
        assert_eq!(ash[1].tier, Some(Tier::Success));
        assert_eq!(history.characters(), vec!["Ash", "Vel"]);
    }

    #[test]
    fn entries_in_marker_span_characters() {
        let mut markers = MarkerList::new();
        let early = markers
            .add("Early", "", Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
            .unwrap();
        let late = markers
            .add("Late", "", Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap())
            .unwrap();

        let t = |d| Utc.with_ymd_and_hms(2026, 2, d, 0, 0, 0).unwrap();
        let mut history = History::new();
        history.record(HistoryEntry::new("Vel", "B", "", Some(late), None).with_timestamp(t(3)));
        history.record(HistoryEntry::new("Ash", "A", "", Some(late), None).with_timestamp(t(2)));
        history.record(HistoryEntry::new("Ash", "C", "", Some(early), None).with_timestamp(t(1)));

        let in_late: Vec<&str> = history
            .entries_in_marker(late)
            .iter()
            .map(|e| e.action.as_str())
            .collect();
        assert_eq!(in_late, vec!["A", "B"]);
        assert_eq!(history.entries_in_marker(early).len(), 1);
    }

    #[test]
    fn export_markdown_includes_roll_details() {
        let mut markers = MarkerList::new();
        let marker = markers.add("Shore Leave", "", Utc::now()).unwrap();
        let mut ledger = Ledger::new();
        ledger.propose(1, "Old contact").unwrap();
        let spec = CheckSpec::threshold(2, 0).unwrap().with_conditionals(ledger.snapshot());
        let mut source = ScriptedSource::new([15, 6, 2, 4]);
        let check = execute(spec, &mut source).unwrap();

        let mut history = History::new();
        history.record(HistoryEntry::new(
            "Ash",
            "Get Connected",
            "Met the harbourmaster",
            Some(marker),
            Some(check),
        ));

        let md = history.export_markdown("Ash", &markers);
        assert!(md.contains("# Downtime: Ash"));
        assert!(md.contains("## Shore Leave"));
        assert!(md.contains("**Get Connected**"));
        assert!(md.contains("**Triumph**"));
        assert!(md.contains("d20: 15"));
        assert!(md.contains("Confirmed: 1d20 + 2d6kh [6, 2] = 21 (Triumph)"));
        assert!(md.contains("If approved: 1d20 + 3d6kh [6, 2, 4] = 21 (Triumph)"));
        assert!(md.contains("+1 (Old contact) [pending]"));
        assert!(md.contains("> Met the harbourmaster"));
    }

    #[test]
    fn export_text_checkless_entry() {
        let mut history = History::new();
        history.record(HistoryEntry::new("Vel", "Power at a Cost", "Owes a favour", None, None));
        let txt = history.export_text("vel", &MarkerList::new());
        assert!(txt.starts_with("Downtime: vel\n============="));
        assert!(txt.contains("Power at a Cost"));
        assert!(txt.contains(": Done"));
        assert!(txt.contains("Notes: Owes a favour"));
    }

    #[test]
    fn history_serde_roundtrip() {
        let mut history = History::new();
        history.record(HistoryEntry::new("Ash", "Get Creative", "", None, Some(flat_check(20))));
        let json = serde_json::to_string(&history).unwrap();
        let back: History = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.entries_for("Ash"), history.entries_for("Ash"));
    }
}
