//! Fixtures and mock collaborators for unit tests.

use crate::error::SigmaxError;
use crate::response::StufResponse;
use crate::transport::StufTransport;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use signals_core::signal::{
    CategoryAssignment, Location, NewNote, Note, Point, Priority, Reporter, Stadsdeel,
};
use signals_core::{
    Result, RoundtripRepository, Signal, SignalActions, SignalsError, State, Status, StatusUpdate,
    TargetApi,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap()
}

pub fn signal() -> Signal {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let address = match json!({
        "openbare_ruimte": "Amstel",
        "huisnummer": 1,
        "postcode": "",
        "woonplaats": "Amsterdam",
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };

    Signal {
        id: 999,
        text: "Container is vol".to_string(),
        text_extra: Some("Al een week".to_string()),
        created_at,
        incident_date_start: created_at,
        incident_date_end: None,
        location: Location::new(Point::new(4.9, 52.367))
            .with_stadsdeel(Stadsdeel::Centrum)
            .with_address(address),
        priority: Priority::Normal,
        status: Status {
            state: State::TeVerzenden,
            text: None,
            user: None,
            target_api: Some(TargetApi::Sigmax),
            created_at,
        },
        category: CategoryAssignment {
            main: "Afval".to_string(),
            sub: "Container is vol".to_string(),
            departments: vec!["STW".to_string()],
        },
        reporter: Reporter {
            email: Some("melder@example.com".to_string()),
            phone: None,
        },
    }
}

/// A CityControl acknowledgement.
pub fn bv03() -> StufResponse {
    StufResponse {
        status: 200,
        body: r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <StUF:Bv03Bericht xmlns:StUF="http://www.egem.nl/StUF/StUF0301">
      <StUF:stuurgegevens>
        <StUF:berichtcode>Bv03</StUF:berichtcode>
      </StUF:stuurgegevens>
    </StUF:Bv03Bericht>
  </soap:Body>
</soap:Envelope>"#
            .to_string(),
    }
}

/// Replays scripted replies and records what was sent.
pub struct MockTransport {
    replies: Mutex<VecDeque<std::result::Result<StufResponse, SigmaxError>>>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    pub fn replying(replies: Vec<std::result::Result<StufResponse, SigmaxError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// `(message, soap_action)` pairs in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl StufTransport for MockTransport {
    async fn send(
        &self,
        message: &str,
        soap_action: &str,
    ) -> std::result::Result<StufResponse, SigmaxError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.to_string(), soap_action.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SigmaxError::Transport("no reply scripted".into())))
    }
}

#[derive(Default)]
pub struct MockActions {
    statuses: Mutex<Vec<StatusUpdate>>,
    notes: Mutex<Vec<NewNote>>,
    status_error: Mutex<Option<SignalsError>>,
}

impl MockActions {
    pub fn statuses(&self) -> Vec<StatusUpdate> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn notes(&self) -> Vec<NewNote> {
        self.notes.lock().unwrap().clone()
    }

    pub fn fail_status_updates(&self, error: SignalsError) {
        *self.status_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl SignalActions for MockActions {
    async fn update_status(&self, _signal_id: i64, update: StatusUpdate) -> Result<Status> {
        if let Some(error) = self.status_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.statuses.lock().unwrap().push(update.clone());
        Ok(update.into_status(Utc::now()))
    }

    async fn create_note(&self, _signal_id: i64, note: NewNote) -> Result<Note> {
        self.notes.lock().unwrap().push(note.clone());
        Ok(note.into_note(Utc::now()))
    }
}

#[derive(Default)]
pub struct MockRoundtrips {
    counts: Mutex<HashMap<i64, usize>>,
}

impl MockRoundtrips {
    pub fn with_count(signal_id: i64, count: usize) -> Self {
        let roundtrips = Self::default();
        roundtrips.counts.lock().unwrap().insert(signal_id, count);
        roundtrips
    }
}

#[async_trait]
impl RoundtripRepository for MockRoundtrips {
    async fn count(&self, signal_id: i64) -> Result<usize> {
        Ok(self.counts.lock().unwrap().get(&signal_id).copied().unwrap_or(0))
    }

    async fn record(&self, signal_id: i64) -> Result<()> {
        *self.counts.lock().unwrap().entry(signal_id).or_insert(0) += 1;
        Ok(())
    }
}
