use dt_engine::{CheckKind, execute};
use dt_history::TrackerConfig;

use crate::CheckArgs;

pub fn run(
    config: &TrackerConfig,
    kind: &str,
    args: &CheckArgs,
    json: bool,
) -> Result<(), String> {
    let kind = CheckKind::from_str_tag(kind).map_err(|e| e.to_string())?;
    let spec = super::build_spec(kind, args)?;
    let mut source = config.engine().source();
    let result = execute(spec, &mut source).map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let title = match kind {
        CheckKind::ThresholdRoll => "Threshold roll",
        CheckKind::SuccessPool => "Success pool",
    };
    println!("  {title}");
    super::print_check(&result);
    Ok(())
}
