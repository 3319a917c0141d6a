use crate::output::print_json;
use std::path::Path;
use weekplan_core::calendar::{current_week_key, week_window};
use weekplan_core::WeekKey;

pub fn run(
    root: &Path,
    week: Option<WeekKey>,
    past: Option<usize>,
    future: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let current = week.unwrap_or_else(|| current_week_key(super::today()));
    let weeks = week_window(
        current,
        past.unwrap_or(config.past_weeks),
        future.unwrap_or(config.future_weeks),
    );

    if json {
        print_json(&serde_json::json!({ "current": current, "weeks": weeks }))?;
        return Ok(());
    }

    for k in &weeks {
        if *k == current {
            println!("{k}  <- current");
        } else {
            println!("{k}");
        }
    }
    Ok(())
}
