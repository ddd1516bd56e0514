//! Shared fixtures for store tests.

use chrono::{TimeZone, Utc};
use signals_core::signal::{CategoryAssignment, Location, Point, Priority, Reporter, Stadsdeel};
use signals_core::{Signal, State, Status, TargetApi};

pub fn signal(id: i64) -> Signal {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    Signal {
        id,
        text: "Lantaarnpaal kapot".to_string(),
        text_extra: None,
        created_at,
        incident_date_start: created_at,
        incident_date_end: None,
        location: Location::new(Point::new(4.89, 52.37)).with_stadsdeel(Stadsdeel::West),
        priority: Priority::High,
        status: Status {
            state: State::TeVerzenden,
            text: Some("Naar THOR".to_string()),
            user: Some("operator@example.com".to_string()),
            target_api: Some(TargetApi::Sigmax),
            created_at,
        },
        category: CategoryAssignment {
            main: "Wegen, verkeer, straatmeubilair".to_string(),
            sub: "Lantaarnpaal straatverlichting".to_string(),
            departments: vec!["VOR".to_string()],
        },
        reporter: Reporter::default(),
    }
}
