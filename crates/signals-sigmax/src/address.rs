//! Address completeness check for CityControl.

use serde_json::Value;
use signals_core::signal::Address;

/// Keys CityControl needs to place a case at an address.
pub const REQUIRED_ADDRESS_FIELDS: [&str; 3] = ["woonplaats", "openbare_ruimte", "huisnummer"];

/// Returns whether an address has everything CityControl needs.
///
/// The address is not validated against the BAG (the national address
/// register); only presence and shape of the required parts are checked.
/// Signals without a usable address are still sent, located by their
/// coordinates only.
pub fn address_matches_sigmax_expectation(address: Option<&Address>) -> bool {
    let Some(address) = address.filter(|a| !a.is_empty()) else {
        return false;
    };

    if REQUIRED_ADDRESS_FIELDS
        .iter()
        .any(|field| !address.contains_key(*field))
    {
        return false;
    }

    if !address.get("huisnummer").is_some_and(is_house_number) {
        return false;
    }

    address.get("woonplaats").is_some_and(is_non_blank_string)
        && address.get("openbare_ruimte").is_some_and(is_non_blank_string)
}

/// An integer, or a string holding one.
fn is_house_number(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn is_non_blank_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.trim().is_empty())
}
