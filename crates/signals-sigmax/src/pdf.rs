//! PDF attachment for a case.
//!
//! CityControl shows the attachment to the field workers, so it carries the
//! details that do not fit the case fields themselves.

use crate::error::SigmaxError;
use crate::messages::incident_date_end;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use signals_core::Signal;
use signals_core::signal::Priority;

/// Produces the document attached to a case.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, signal: &Signal) -> Result<Vec<u8>, SigmaxError>;
}

/// Base64 text of a document, as embedded in STUF messages.
pub fn encode_document(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 50;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 14;
const MAX_LINE_CHARS: usize = 90;
const MAX_LINES: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

/// Renders a single A4 page in Helvetica listing the signal's details.
#[derive(Debug, Clone, Default)]
pub struct SimplePdfRenderer;

impl SimplePdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn lines(signal: &Signal) -> Vec<String> {
        let mut lines = vec![
            format!("Melding {}", signal.sia_id()),
            String::new(),
            format!("Gemeld op: {}", signal.created_at.format("%d-%m-%Y %H:%M")),
            format!(
                "Overlast begonnen: {}",
                signal.incident_date_start.format("%d-%m-%Y %H:%M")
            ),
            format!(
                "Afhandelen voor: {}",
                incident_date_end(signal).format("%d-%m-%Y")
            ),
            format!(
                "Urgentie: {}",
                match signal.priority {
                    Priority::High => "Hoog",
                    Priority::Normal => "Normaal",
                    Priority::Low => "Laag",
                }
            ),
            format!(
                "Categorie: {} - {}",
                signal.category.main, signal.category.sub
            ),
        ];

        if !signal.category.departments.is_empty() {
            lines.push(format!(
                "Verantwoordelijke afdeling: {}",
                signal.category.departments.join(", ")
            ));
        }

        lines.push(format!(
            "Stadsdeel: {}",
            signal.location.stadsdeel.map(|s| s.name()).unwrap_or("-")
        ));
        let address = signal.location.address_text(false);
        lines.push(format!(
            "Adres: {}",
            if address.is_empty() { "-" } else { address.as_str() }
        ));
        lines.push(format!(
            "Locatie: {}, {}",
            signal.location.geometrie.y, signal.location.geometrie.x
        ));
        lines.push(String::new());
        lines.push("Omschrijving:".to_string());
        lines.extend(wrap(&signal.text, MAX_LINE_CHARS));

        if let Some(extra) = signal.text_extra.as_deref().filter(|t| !t.trim().is_empty()) {
            lines.push(String::new());
            lines.push("Aanvullende informatie:".to_string());
            lines.extend(wrap(extra, MAX_LINE_CHARS));
        }

        lines.push(String::new());
        lines.push(format!(
            "E-mail melder: {}",
            signal.reporter.email.as_deref().unwrap_or("-")
        ));
        lines.push(format!(
            "Telefoonnummer melder: {}",
            signal.reporter.phone.as_deref().unwrap_or("-")
        ));

        if lines.len() > MAX_LINES {
            lines.truncate(MAX_LINES - 1);
            lines.push("...".to_string());
        }
        lines
    }
}

impl DocumentRenderer for SimplePdfRenderer {
    fn render(&self, signal: &Signal) -> Result<Vec<u8>, SigmaxError> {
        let mut content = format!(
            "BT\n/F1 {FONT_SIZE} Tf\n{LEADING} TL\n{MARGIN} {} Td\n",
            PAGE_HEIGHT - MARGIN
        );
        for line in Self::lines(signal) {
            content.push('(');
            content.push_str(&pdf_string(&line));
            content.push_str(") Tj T*\n");
        }
        content.push_str("ET\n");

        Ok(assemble(&content))
    }
}

/// Writes the five objects of a one page document and the cross reference table.
fn assemble(content: &str) -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}endstream",
            content.len()
        ),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{object}\nendobj\n", index + 1));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));

    out.into_bytes()
}

/// Escapes text for a PDF literal string in WinAnsi encoding.
///
/// The output is ASCII only: Latin-1 characters become octal escapes,
/// anything beyond is replaced by `?`.
fn pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            '\u{a0}'..='\u{ff}' => escaped.push_str(&format!("\\{:03o}", c as u32)),
            '\t' => escaped.push(' '),
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Splits text into lines of at most `width` characters at word boundaries.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let line_len = line.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
