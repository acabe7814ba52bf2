//! The default downtime action catalog.

use dt_engine::CheckKind;

use super::{ActionCatalog, DowntimeAction};

/// Common downtime actions: most call for a threshold roll, a few resolve
/// automatically, and long projects use a success pool.
pub fn standard() -> ActionCatalog {
    let threshold = Some(CheckKind::ThresholdRoll);
    let actions = [
        DowntimeAction::new(
            "Buy Some Time",
            "Hold off a threat or delay a deadline for a while longer.",
            threshold,
        ),
        DowntimeAction::new(
            "Gather Information",
            "Ask around, dig through records, or tail someone to learn something.",
            threshold,
        ),
        DowntimeAction::new(
            "Get a Damn Drink",
            "Unwind somewhere lively and see who or what turns up.",
            threshold,
        ),
        DowntimeAction::new(
            "Get Connected",
            "Call in a favour or make contact with a group for help.",
            threshold,
        ),
        DowntimeAction::new(
            "Get Creative",
            "Tinker, invent, or improvise something the party needs.",
            threshold,
        ),
        DowntimeAction::new(
            "Get Focused",
            "Train and study to pick up a new skill or talent.",
            None,
        ),
        DowntimeAction::new(
            "Power at a Cost",
            "Get what you want, provided you accept the price the referee names.",
            None,
        ),
        DowntimeAction::new(
            "Scrounge and Barter",
            "Hunt down gear or trade for something hard to come by.",
            threshold,
        ),
        DowntimeAction::new(
            "Work on a Project",
            "Make progress on a long-term project, one success at a time.",
            Some(CheckKind::SuccessPool),
        ),
    ];

    ActionCatalog {
        actions: Vec::from(actions),
    }
}
