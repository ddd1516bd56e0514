//! Signal status workflow.
//!
//! Every status a signal can be in, the wire code it is stored under, and
//! which status changes are allowed. Stores consult [`State::can_transition_to`]
//! before accepting a [`StatusUpdate`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The workflow state of a signal.
///
/// Serialized with the short codes used by the Signals API (`"m"`, `"sent"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    /// Reported, not yet picked up.
    #[serde(rename = "m")]
    Gemeld,
    /// Waiting for information.
    #[serde(rename = "i")]
    Afwachting,
    /// Being handled.
    #[serde(rename = "b")]
    Behandeling,
    #[serde(rename = "h")]
    OnHold,
    /// Handled.
    #[serde(rename = "o")]
    Afgehandeld,
    /// Cancelled.
    #[serde(rename = "a")]
    Geannuleerd,
    /// Reopened after being handled.
    #[serde(rename = "reopened")]
    Heropend,
    /// Queued for dispatch to an external system.
    #[serde(rename = "ready to send")]
    TeVerzenden,
    /// Dispatched to an external system.
    #[serde(rename = "sent")]
    Verzonden,
    /// Dispatch to an external system failed.
    #[serde(rename = "send failed")]
    VerzendenMislukt,
    /// Handled by the external system.
    #[serde(rename = "done external")]
    AfgehandeldExtern,
    #[serde(rename = "closure requested")]
    VerzoekTotAfhandeling,
}

impl State {
    pub const ALL: [State; 12] = [
        State::Gemeld,
        State::Afwachting,
        State::Behandeling,
        State::OnHold,
        State::Afgehandeld,
        State::Geannuleerd,
        State::Heropend,
        State::TeVerzenden,
        State::Verzonden,
        State::VerzendenMislukt,
        State::AfgehandeldExtern,
        State::VerzoekTotAfhandeling,
    ];

    /// The wire code of this state.
    pub fn code(&self) -> &'static str {
        match self {
            State::Gemeld => "m",
            State::Afwachting => "i",
            State::Behandeling => "b",
            State::OnHold => "h",
            State::Afgehandeld => "o",
            State::Geannuleerd => "a",
            State::Heropend => "reopened",
            State::TeVerzenden => "ready to send",
            State::Verzonden => "sent",
            State::VerzendenMislukt => "send failed",
            State::AfgehandeldExtern => "done external",
            State::VerzoekTotAfhandeling => "closure requested",
        }
    }

    /// Human readable (Dutch) label, as shown to operators.
    pub fn label(&self) -> &'static str {
        match self {
            State::Gemeld => "Gemeld",
            State::Afwachting => "In afwachting van behandeling",
            State::Behandeling => "In behandeling",
            State::OnHold => "On hold",
            State::Afgehandeld => "Afgehandeld",
            State::Geannuleerd => "Geannuleerd",
            State::Heropend => "Heropend",
            State::TeVerzenden => "Te verzenden naar extern systeem",
            State::Verzonden => "Verzonden naar extern systeem",
            State::VerzendenMislukt => "Verzending naar extern systeem mislukt",
            State::AfgehandeldExtern => "Melding is afgehandeld in extern systeem",
            State::VerzoekTotAfhandeling => "Verzoek tot afhandeling",
        }
    }

    /// States reachable from this one.
    pub fn allowed_transitions(&self) -> &'static [State] {
        use State::*;
        match self {
            Gemeld => &[
                Gemeld,
                Afwachting,
                Behandeling,
                OnHold,
                TeVerzenden,
                Afgehandeld,
                Geannuleerd,
                VerzoekTotAfhandeling,
            ],
            Afwachting => &[
                Afwachting,
                Behandeling,
                OnHold,
                TeVerzenden,
                Afgehandeld,
                Geannuleerd,
                VerzoekTotAfhandeling,
            ],
            Behandeling => &[
                Behandeling,
                OnHold,
                TeVerzenden,
                Afgehandeld,
                Geannuleerd,
                VerzoekTotAfhandeling,
            ],
            OnHold => &[
                OnHold,
                Afwachting,
                Behandeling,
                TeVerzenden,
                Afgehandeld,
                Geannuleerd,
            ],
            // A queued dispatch resolves one way or the other.
            TeVerzenden => &[Verzonden, VerzendenMislukt],
            Verzonden => &[AfgehandeldExtern],
            VerzendenMislukt => &[Gemeld, TeVerzenden],
            AfgehandeldExtern => &[Afgehandeld, Behandeling, Geannuleerd],
            VerzoekTotAfhandeling => &[Afgehandeld, Behandeling, Geannuleerd],
            Afgehandeld => &[Heropend, Geannuleerd],
            Geannuleerd => &[Geannuleerd],
            Heropend => &[
                Heropend,
                Behandeling,
                Afgehandeld,
                Geannuleerd,
                TeVerzenden,
                VerzoekTotAfhandeling,
            ],
        }
    }

    pub fn can_transition_to(&self, next: State) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// External systems a signal can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetApi {
    Sigmax,
}

/// A status entry in a signal's history. The last entry is the current status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Set when `state` is [`State::TeVerzenden`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_api: Option<TargetApi>,
    pub created_at: DateTime<Utc>,
}

/// A requested status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub state: State,
    pub text: Option<String>,
    pub user: Option<String>,
    pub target_api: Option<TargetApi>,
}

impl StatusUpdate {
    pub fn new(state: State) -> Self {
        Self {
            state,
            text: None,
            user: None,
            target_api: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Materializes the update as a status entry stamped at `now`.
    pub fn into_status(self, now: DateTime<Utc>) -> Status {
        Status {
            state: self.state,
            text: self.text,
            user: self.user,
            target_api: self.target_api,
            created_at: now,
        }
    }
}
