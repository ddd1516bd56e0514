//! Location value objects: borough, address and geometry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Address as delivered by the address lookup: a loosely typed JSON object.
///
/// Keys used downstream: `openbare_ruimte`, `huisnummer`, `huisletter`,
/// `huisnummer_toevoeging`, `postcode`, `woonplaats`. Values may be strings
/// or numbers depending on the source.
pub type Address = serde_json::Map<String, Value>;

/// Boroughs (stadsdelen) of Amsterdam, serialized with their official codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stadsdeel {
    #[serde(rename = "A")]
    Centrum,
    #[serde(rename = "N")]
    Noord,
    #[serde(rename = "F")]
    NieuwWest,
    #[serde(rename = "M")]
    Oost,
    #[serde(rename = "E")]
    West,
    #[serde(rename = "B")]
    Westpoort,
    #[serde(rename = "K")]
    Zuid,
    #[serde(rename = "T")]
    Zuidoost,
}

impl Stadsdeel {
    pub fn code(&self) -> &'static str {
        match self {
            Stadsdeel::Centrum => "A",
            Stadsdeel::Noord => "N",
            Stadsdeel::NieuwWest => "F",
            Stadsdeel::Oost => "M",
            Stadsdeel::West => "E",
            Stadsdeel::Westpoort => "B",
            Stadsdeel::Zuid => "K",
            Stadsdeel::Zuidoost => "T",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stadsdeel::Centrum => "Centrum",
            Stadsdeel::Noord => "Noord",
            Stadsdeel::NieuwWest => "Nieuw-West",
            Stadsdeel::Oost => "Oost",
            Stadsdeel::West => "West",
            Stadsdeel::Westpoort => "Westpoort",
            Stadsdeel::Zuid => "Zuid",
            Stadsdeel::Zuidoost => "Zuidoost",
        }
    }
}

/// A point in WGS84, `x` is longitude and `y` latitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub geometrie: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadsdeel: Option<Stadsdeel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buurt_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Address fields in display order, with the separator placed before each.
const ADDRESS_TEXT_FIELDS: [(&str, &str); 6] = [
    ("openbare_ruimte", ""),
    ("huisnummer", " "),
    ("huisletter", ""),
    ("huisnummer_toevoeging", "-"),
    ("postcode", " "),
    ("woonplaats", " "),
];

impl Location {
    pub fn new(geometrie: Point) -> Self {
        Self {
            geometrie,
            stadsdeel: None,
            buurt_code: None,
            address: None,
        }
    }

    pub fn with_stadsdeel(mut self, stadsdeel: Stadsdeel) -> Self {
        self.stadsdeel = Some(stadsdeel);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Renders the address as a single line.
    ///
    /// The short form stops after the house number addition and leaves out
    /// postcode and city. Missing or empty fields are skipped.
    pub fn address_text(&self, short: bool) -> String {
        let Some(address) = &self.address else {
            return String::new();
        };

        let fields = if short {
            &ADDRESS_TEXT_FIELDS[..4]
        } else {
            &ADDRESS_TEXT_FIELDS[..]
        };

        let mut text = String::new();
        for (field, prefix) in fields {
            if let Some(value) = address.get(*field).and_then(display_value) {
                text.push_str(prefix);
                text.push_str(&value);
            }
        }
        text
    }

    pub fn short_address_text(&self) -> String {
        self.address_text(true)
    }
}

/// Text of an address value, or `None` when the value counts as empty.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
