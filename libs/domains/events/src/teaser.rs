use domain_teams::Team;

use crate::error::{EventError, EventResult};
use crate::models::Event;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// One-line promotional summary of a match, e.g.
///
/// ```text
/// Dragons vs Phoenix – 2025-07-01T20:00 at Paris. Players: Alice Anderson, Bob Brown vs Charlie Clark, Dave Dixon
/// ```
///
/// The ` at {city}` part is left out when the event has no city.
pub fn generate_teaser(event: &Event) -> EventResult<String> {
    let (Some(team_a), Some(team_b)) = (&event.team_a, &event.team_b) else {
        return Err(EventError::validation("Both teamA and teamB are required"));
    };
    let Some(event_date) = event.event_date else {
        return Err(EventError::validation("Event date is required"));
    };

    let mut teaser = format!(
        "{} vs {} – {}",
        team_a.name,
        team_b.name,
        event_date.format(DATE_FORMAT)
    );
    if let Some(city) = event.city.as_deref().filter(|c| !c.trim().is_empty()) {
        teaser.push_str(" at ");
        teaser.push_str(city);
    }
    teaser.push_str(&format!(
        ". Players: {} vs {}",
        roster(team_a),
        roster(team_b)
    ));

    Ok(teaser)
}

fn roster(team: &Team) -> String {
    team.players
        .iter()
        .map(|p| p.full_name())
        .collect::<Vec<_>>()
        .join(", ")
}
