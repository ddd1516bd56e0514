//! Validation of CityControl responses.
//!
//! CityControl acknowledges an accepted message with a StUF `Bv03` message.
//! Anything else (a `Fo03` fault, an HTML error page, garbage) means the
//! message was not processed, even when the HTTP status is 200.

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

pub const STUF_NAMESPACE: &[u8] = b"http://www.egem.nl/StUF/StUF0301";
pub const ACKNOWLEDGEMENT_CODE: &str = "Bv03";

/// A response received from CityControl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StufResponse {
    pub status: u16,
    pub body: String,
}

impl StufResponse {
    /// Accepted by CityControl: HTTP 200 and a `Bv03` acknowledgement.
    pub fn is_ok(&self) -> bool {
        self.status == 200 && stuf_response_ok(&self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Stuurgegevens,
    Berichtcode,
    Other,
}

fn classify(ns: &ResolveResult<'_>, local_name: &[u8], parent: Option<&Element>) -> Element {
    let in_stuf = matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == STUF_NAMESPACE);
    match (in_stuf, local_name) {
        (true, b"stuurgegevens") => Element::Stuurgegevens,
        (true, b"berichtcode") if parent == Some(&Element::Stuurgegevens) => Element::Berichtcode,
        _ => Element::Other,
    }
}

/// Checks that a response body is a StUF `Bv03` message.
///
/// The body must be well-formed XML with exactly one `stuf:berichtcode`
/// directly inside a `stuf:stuurgegevens`, and its text must be `Bv03`.
pub fn stuf_response_ok(body: &str) -> bool {
    match berichtcodes(body) {
        Some(codes) => codes.len() == 1 && codes[0] == ACKNOWLEDGEMENT_CODE,
        None => false,
    }
}

/// Texts of all `stuurgegevens/berichtcode` elements, or `None` when the body
/// is not well-formed XML.
///
/// Only the text before the first child element of a `berichtcode` counts.
fn berichtcodes(body: &str) -> Option<Vec<String>> {
    let mut reader = NsReader::from_str(body);
    let mut stack: Vec<Element> = Vec::new();
    let mut codes = Vec::new();
    let mut current: Option<String> = None;
    // Cleared by the first child of the open berichtcode.
    let mut collecting = false;
    let mut seen_root = false;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(start))) => {
                collecting = false;
                let element = classify(&ns, start.local_name().as_ref(), stack.last());
                if element == Element::Berichtcode {
                    current = Some(String::new());
                    collecting = true;
                }
                stack.push(element);
                seen_root = true;
            }
            Ok((ns, Event::Empty(empty))) => {
                collecting = false;
                if classify(&ns, empty.local_name().as_ref(), stack.last()) == Element::Berichtcode {
                    codes.push(String::new());
                }
                seen_root = true;
            }
            Ok((_, Event::Text(text))) => {
                if let Some(code) = current.as_mut().filter(|_| collecting) {
                    code.push_str(std::str::from_utf8(&text).ok()?);
                }
            }
            Ok((_, Event::CData(data))) => {
                if let Some(code) = current.as_mut().filter(|_| collecting) {
                    code.push_str(std::str::from_utf8(&data).ok()?);
                }
            }
            Ok((_, Event::GeneralRef(reference))) => {
                if let Some(code) = current.as_mut().filter(|_| collecting) {
                    code.push_str(&resolve_reference(&reference)?);
                }
            }
            Ok((_, Event::End(_))) => {
                collecting = false;
                if stack.pop()? == Element::Berichtcode {
                    codes.extend(current.take());
                }
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    // Unclosed elements or no document element at all.
    if !stack.is_empty() || !seen_root {
        return None;
    }
    Some(codes)
}

/// Character references and the predefined XML entities; anything else is
/// undeclared and makes the document invalid.
fn resolve_reference(reference: &BytesRef<'_>) -> Option<String> {
    if let Some(ch) = reference.resolve_char_ref().ok()? {
        return Some(ch.to_string());
    }
    let name = reference.decode().ok()?;
    resolve_predefined_entity(&name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(stuurgegevens: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <StUF:Bv03Bericht xmlns:StUF="http://www.egem.nl/StUF/StUF0301">
      {stuurgegevens}
    </StUF:Bv03Bericht>
  </soap:Body>
</soap:Envelope>"#
        )
    }

    fn stuurgegevens(code: &str) -> String {
        format!(
            "<StUF:stuurgegevens><StUF:berichtcode>{code}</StUF:berichtcode>\
             <StUF:referentienummer>SIA-1.01</StUF:referentienummer></StUF:stuurgegevens>"
        )
    }

    #[test]
    fn test_bv03_is_ok() {
        assert!(stuf_response_ok(&envelope(&stuurgegevens("Bv03"))));
    }

    #[test]
    fn test_other_codes_are_not_ok() {
        assert!(!stuf_response_ok(&envelope(&stuurgegevens("Fo03"))));
        assert!(!stuf_response_ok(&envelope(&stuurgegevens(" Bv03 "))));
        assert!(!stuf_response_ok(&envelope(&stuurgegevens(""))));
    }

    #[test]
    fn test_missing_berichtcode_is_not_ok() {
        assert!(!stuf_response_ok(&envelope(
            "<StUF:stuurgegevens><StUF:zender/></StUF:stuurgegevens>"
        )));
    }

    #[test]
    fn test_multiple_berichtcodes_are_not_ok() {
        let twice = format!("{}{}", stuurgegevens("Bv03"), stuurgegevens("Bv03"));
        assert!(!stuf_response_ok(&envelope(&twice)));
    }

    #[test]
    fn test_namespace_is_checked() {
        let body = r#"<Envelope xmlns:x="urn:other"><x:stuurgegevens><x:berichtcode>Bv03</x:berichtcode></x:stuurgegevens></Envelope>"#;
        assert!(!stuf_response_ok(body));
    }

    #[test]
    fn test_default_namespace_is_resolved() {
        let body = r#"<stuurgegevens xmlns="http://www.egem.nl/StUF/StUF0301"><berichtcode>Bv03</berichtcode></stuurgegevens>"#;
        assert!(stuf_response_ok(body));
    }

    #[test]
    fn test_berichtcode_outside_stuurgegevens_is_ignored() {
        let body = envelope(&format!(
            "<StUF:berichtcode>Bv03</StUF:berichtcode>{}",
            stuurgegevens("Fo03")
        ));
        assert!(!stuf_response_ok(&body));
    }

    #[test]
    fn test_malformed_xml_is_not_ok() {
        assert!(!stuf_response_ok(""));
        assert!(!stuf_response_ok("not xml at all"));
        assert!(!stuf_response_ok("<html><body>502 Bad Gateway</body>"));
        assert!(!stuf_response_ok(
            "<a xmlns:StUF=\"http://www.egem.nl/StUF/StUF0301\"><StUF:stuurgegevens><StUF:berichtcode>Bv03</StUF:berichtcode></a>"
        ));
    }

    #[test]
    fn test_references_in_code_are_resolved() {
        assert!(stuf_response_ok(&envelope(&stuurgegevens("Bv&#48;3"))));
        assert!(stuf_response_ok(&envelope(&stuurgegevens("&#x42;v03"))));
        assert!(!stuf_response_ok(&envelope(&stuurgegevens("Bv&amp;03"))));
        assert!(!stuf_response_ok(&envelope(&stuurgegevens("Bv&unknown;03"))));
    }

    #[test]
    fn test_text_after_child_element_is_ignored() {
        assert!(!stuf_response_ok(&envelope(&stuurgegevens("Bv<x/>03"))));
        assert!(!stuf_response_ok(&envelope(&stuurgegevens("Bv<x>0</x>3"))));
        assert!(stuf_response_ok(&envelope(&stuurgegevens("Bv03<x/>"))));
    }

    #[test]
    fn test_response_requires_status_200() {
        let body = envelope(&stuurgegevens("Bv03"));
        assert!(StufResponse { status: 200, body: body.clone() }.is_ok());
        assert!(!StufResponse { status: 202, body }.is_ok());
    }
}
