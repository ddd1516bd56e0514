//! STUF message generation.
//!
//! Both messages are minijinja templates embedded in the crate. The template
//! context is built here so the templates only do layout.

use crate::address::address_matches_sigmax_expectation;
use crate::error::SigmaxError;
use crate::omschrijving::omschrijving;
use crate::pdf::encode_document;
use crate::sequence::SequenceNumber;
use chrono::{DateTime, TimeDelta, Utc};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use signals_core::signal::{Address, Priority};
use signals_core::Signal;
use uuid::Uuid;

pub const CREEER_ZAAK_TEMPLATE: &str = "creeerZaak_Lk01.xml";
pub const VOEG_ZAAKDOCUMENT_TOE_TEMPLATE: &str = "voegZaakdocumentToe_Lk01.xml";

const DOC_TYPE: &str = "PDF";
const DOC_CONTENT_TYPE: &str = "application/pdf";

/// StUF date, `YYYYMMDD`.
pub fn stuf_date(value: DateTime<Utc>) -> String {
    value.format("%Y%m%d").to_string()
}

/// StUF timestamp, `YYYYMMDDHHMMSS`.
pub fn stuf_timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y%m%d%H%M%S").to_string()
}

/// Planned end date of the case.
///
/// An explicit end date on the signal wins; otherwise high priority signals
/// are due the next day and all others after three days.
pub fn incident_date_end(signal: &Signal) -> DateTime<Utc> {
    signal.incident_date_end.unwrap_or_else(|| {
        let days = match signal.priority {
            Priority::High => 1,
            Priority::Normal | Priority::Low => 3,
        };
        signal.created_at + TimeDelta::days(days)
    })
}

#[derive(Serialize)]
struct CreeerZaakContext<'a> {
    sia_id: String,
    sequence_number: String,
    tijdstip_bericht: String,
    omschrijving: String,
    toelichting: &'a str,
    signal_url: String,
    category_main: &'a str,
    category_sub: &'a str,
    address_matches_sigmax_expectation: bool,
    address: Option<&'a Address>,
    x: String,
    y: String,
    registratiedatum: String,
    startdatum: String,
    einddatum_gepland: String,
    prioriteit: &'static str,
    stadsdeel: &'static str,
}

#[derive(Serialize)]
struct VoegZaakdocumentToeContext {
    sia_id: String,
    sequence_number: String,
    tijdstip_bericht: String,
    creatiedatum: String,
    doc_uuid: String,
    doc_type: &'static str,
    content_type: &'static str,
    file_name: String,
    data: String,
}

/// Renders the outgoing STUF messages.
pub struct StufMessages {
    env: Environment<'static>,
    api_base: String,
}

impl StufMessages {
    /// Loads the embedded templates.
    ///
    /// `api_base` is the public base URL of the Signals API, used to link the
    /// case back to the signal.
    pub fn new(api_base: impl Into<String>) -> Result<Self, SigmaxError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        env.add_template(
            CREEER_ZAAK_TEMPLATE,
            include_str!("../templates/creeerZaak_Lk01.xml"),
        )
        .map_err(|source| SigmaxError::Render {
            template: CREEER_ZAAK_TEMPLATE,
            source,
        })?;
        env.add_template(
            VOEG_ZAAKDOCUMENT_TOE_TEMPLATE,
            include_str!("../templates/voegZaakdocumentToe_Lk01.xml"),
        )
        .map_err(|source| SigmaxError::Render {
            template: VOEG_ZAAKDOCUMENT_TOE_TEMPLATE,
            source,
        })?;

        Ok(Self {
            env,
            api_base: api_base.into(),
        })
    }

    /// Message creating a case (zaak) for the signal.
    ///
    /// Signals without a complete address are sent with coordinates only;
    /// CityControl accepts cases in parks or on the water.
    pub fn creeer_zaak_lk01(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
        now: DateTime<Utc>,
    ) -> Result<String, SigmaxError> {
        let address = signal.location.address.as_ref();
        let context = CreeerZaakContext {
            sia_id: signal.sia_id(),
            sequence_number: sequence_number.to_string(),
            tijdstip_bericht: stuf_timestamp(now),
            omschrijving: omschrijving(signal, sequence_number),
            toelichting: &signal.text,
            signal_url: self.signal_url(signal),
            category_main: &signal.category.main,
            category_sub: &signal.category.sub,
            address_matches_sigmax_expectation: address_matches_sigmax_expectation(address),
            address,
            x: signal.location.geometrie.x.to_string(),
            y: signal.location.geometrie.y.to_string(),
            registratiedatum: stuf_date(signal.created_at),
            startdatum: stuf_date(signal.incident_date_start),
            einddatum_gepland: stuf_date(incident_date_end(signal)),
            prioriteit: match signal.priority {
                Priority::High => "high",
                Priority::Normal => "normal",
                Priority::Low => "low",
            },
            stadsdeel: signal.location.stadsdeel.map(|s| s.name()).unwrap_or(""),
        };

        self.render(CREEER_ZAAK_TEMPLATE, &context)
    }

    /// Message attaching a PDF to the case created for `sequence_number`.
    pub fn voeg_zaakdocument_toe_lk01(
        &self,
        signal: &Signal,
        sequence_number: SequenceNumber,
        pdf: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, SigmaxError> {
        let sia_id = signal.sia_id();
        let context = VoegZaakdocumentToeContext {
            file_name: format!("{sia_id}.pdf"),
            sia_id,
            sequence_number: sequence_number.to_string(),
            tijdstip_bericht: stuf_timestamp(now),
            creatiedatum: stuf_date(now),
            doc_uuid: Uuid::new_v4().to_string(),
            doc_type: DOC_TYPE,
            content_type: DOC_CONTENT_TYPE,
            data: encode_document(pdf),
        };

        self.render(VOEG_ZAAKDOCUMENT_TOE_TEMPLATE, &context)
    }

    fn signal_url(&self, signal: &Signal) -> String {
        format!(
            "{}/signals/v1/private/signals/{}",
            self.api_base.trim_end_matches('/'),
            signal.id
        )
    }

    fn render<S: Serialize>(&self, template: &'static str, context: &S) -> Result<String, SigmaxError> {
        self.env
            .get_template(template)
            .and_then(|t| t.render(context))
            .map_err(|source| SigmaxError::Render { template, source })
    }
}
