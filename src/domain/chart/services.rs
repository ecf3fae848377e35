use super::value_objects::{MARKER_SIZE, MarkerShape, MarkerSpec};
use crate::domain::resources::{Color, Day, RecommendationEvent, Resource, ResourceSeries};
use crate::domain::time::same_calendar_day;
use chrono::DateTime;

/// Events whose accept instant falls on the given UTC calendar day,
/// ascending by accept time
pub fn events_on_day(series: &ResourceSeries, day: Day) -> Vec<&RecommendationEvent> {
    series
        .events
        .iter()
        .filter(|(at, _)| same_calendar_day(**at, day.as_timestamp()))
        .map(|(_, event)| event)
        .collect()
}

fn format_day(day: Day) -> String {
    match DateTime::from_timestamp_millis(day.value() as i64) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => day.value().to_string(),
    }
}

/// Deterministic tooltip text for one matrix cell. Degrades to the
/// value-only line when no events co-occur with the day.
pub fn tooltip(
    resource: &Resource,
    day: Day,
    value: f64,
    events: &[&RecommendationEvent],
) -> String {
    let mut text = format!("{} on {}: {}", resource.name, format_day(day), value);
    for event in events {
        text.push_str(&format!("\nAccepted by {}", event.actor));
        for action in &event.actions {
            match &action.new_role {
                Some(new_role) => text.push_str(&format!(
                    "\n  replace role {} with role {} on account {}",
                    action.previous_role, new_role, action.affected_account
                )),
                None => text.push_str(&format!(
                    "\n  remove role {} from account {}",
                    action.previous_role, action.affected_account
                )),
            }
        }
        text.push_str(&format!("\n  impact: -{} bindings", event.impact));
    }
    text
}

/// `None` for plain days; a fixed-size descriptor for days a
/// recommendation landed on
pub fn marker(
    events: &[&RecommendationEvent],
    color: &Color,
    shape: MarkerShape,
) -> Option<MarkerSpec> {
    if events.is_empty() {
        return None;
    }
    Some(MarkerSpec { color: color.clone(), shape, size: MARKER_SIZE })
}
