//! Short case description shown in the CityControl list view.

use crate::sequence::SequenceNumber;
use signals_core::signal::Stadsdeel;
use signals_core::Signal;

/// CityControl's own borough codes. They differ from the official ones.
pub fn stadsdeel_code(stadsdeel: Option<Stadsdeel>) -> &'static str {
    match stadsdeel {
        Some(Stadsdeel::Centrum) => "SDC",
        Some(Stadsdeel::Noord) => "SDN",
        Some(Stadsdeel::NieuwWest) => "SDNW",
        Some(Stadsdeel::Oost) => "SDO",
        Some(Stadsdeel::West) => "SDW",
        Some(Stadsdeel::Zuid) => "SDZ",
        Some(Stadsdeel::Zuidoost) => "SDZO",
        Some(Stadsdeel::Westpoort) => "SDWP",
        None => "SD--",
    }
}

/// Builds the description, e.g. `SIA-1234.01 URGENT SDC Amstel 1`.
///
/// Category names are left out to stay within CityControl's field length.
pub fn omschrijving(signal: &Signal, sequence_number: SequenceNumber) -> String {
    let urgency = if signal.is_high_priority() {
        "URGENT"
    } else {
        "Terugkerend"
    };

    format!(
        "SIA-{}.{} {} {} {}",
        signal.id,
        sequence_number,
        urgency,
        stadsdeel_code(signal.location.stadsdeel),
        signal.location.short_address_text(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signal;
    use signals_core::signal::Priority;

    #[test]
    fn test_urgent_signal() {
        let mut signal = signal();
        signal.priority = Priority::High;
        let seq = SequenceNumber::next(&signal, 0).unwrap();

        assert_eq!(omschrijving(&signal, seq), "SIA-999.01 URGENT SDC Amstel 1");
    }

    #[test]
    fn test_normal_signal_without_borough() {
        let mut signal = signal();
        signal.location.stadsdeel = None;
        let seq = SequenceNumber::next(&signal, 4).unwrap();

        assert_eq!(
            omschrijving(&signal, seq),
            "SIA-999.05 Terugkerend SD-- Amstel 1"
        );
    }

    #[test]
    fn test_every_borough_has_a_code() {
        assert_eq!(stadsdeel_code(Some(Stadsdeel::NieuwWest)), "SDNW");
        assert_eq!(stadsdeel_code(Some(Stadsdeel::Zuidoost)), "SDZO");
        assert_eq!(stadsdeel_code(Some(Stadsdeel::Westpoort)), "SDWP");
    }
}
