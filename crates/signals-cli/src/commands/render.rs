use super::read_signal;
use crate::MessageKind;
use anyhow::{Context, Result};
use chrono::Utc;
use signals_sigmax::config::DEFAULT_API_BASE;
use signals_sigmax::{DocumentRenderer, SequenceNumber, SimplePdfRenderer, StufMessages};
use std::path::Path;

pub fn execute(
    message: MessageKind,
    signal: &Path,
    sequence: u8,
    api_base: Option<String>,
) -> Result<()> {
    let signal = read_signal(signal)?;
    // `sequence` is validated to 1..=99, the number of earlier roundtrips is one less.
    let sequence_number = SequenceNumber::next(&signal, usize::from(sequence) - 1)?;
    let messages =
        StufMessages::new(api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()))?;
    let now = Utc::now();

    let xml = match message {
        MessageKind::CreeerZaak => messages.creeer_zaak_lk01(&signal, sequence_number, now)?,
        MessageKind::VoegZaakdocument => {
            let pdf = SimplePdfRenderer::new()
                .render(&signal)
                .context("Failed to render the PDF")?;
            messages.voeg_zaakdocument_toe_lk01(&signal, sequence_number, &pdf, now)?
        }
    };

    println!("{xml}");
    Ok(())
}
