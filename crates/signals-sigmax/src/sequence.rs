//! Per-signal sequence numbers.
//!
//! CityControl needs a unique case identifier for every delivery of a signal,
//! so each attempt is suffixed with a two digit sequence number derived from
//! the number of recorded roundtrips.

use crate::error::SigmaxError;
use signals_core::Signal;
use std::fmt;

/// Upper bound on deliveries per signal; the suffix has two digits.
pub const MAX_ROUND_TRIPS: usize = 99;

/// A sequence number in `1..=99`, displayed zero-padded (`"01"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SequenceNumber(u8);

impl SequenceNumber {
    /// The sequence number for the next delivery of `signal`, given how many
    /// roundtrips were recorded for it so far. Counting starts at one.
    pub fn next(signal: &Signal, roundtrip_count: usize) -> Result<Self, SigmaxError> {
        if roundtrip_count >= MAX_ROUND_TRIPS {
            return Err(SigmaxError::TooManyRoundtrips {
                sia_id: signal.sia_id(),
                roundtrips: roundtrip_count,
            });
        }
        // roundtrip_count < 99, so the cast cannot truncate
        Ok(Self(roundtrip_count as u8 + 1))
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signal;

    #[test]
    fn test_first_delivery_is_01() {
        let seq = SequenceNumber::next(&signal(), 0).unwrap();
        assert_eq!(seq.to_string(), "01");
    }

    #[test]
    fn test_counts_up_with_roundtrips() {
        assert_eq!(SequenceNumber::next(&signal(), 9).unwrap().to_string(), "10");
        assert_eq!(SequenceNumber::next(&signal(), 98).unwrap().to_string(), "99");
    }

    #[test]
    fn test_rejects_after_max_round_trips() {
        let err = SequenceNumber::next(&signal(), MAX_ROUND_TRIPS).unwrap_err();
        match err {
            SigmaxError::TooManyRoundtrips { sia_id, roundtrips } => {
                assert_eq!(sia_id, "SIA-999");
                assert_eq!(roundtrips, 99);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(SequenceNumber::next(&signal(), 150).is_err());
    }
}
