//! Reading - the unit of work flowing through the pipeline
//!
//! A raw reading is parsed from message text, normalized once, and every
//! downstream stage (store, gauge, classifier, alert) sees only the
//! normalized form.

use serde::{Deserialize, Serialize};

/// Number of decimal places carried end-to-end.
pub const FREQUENCY_PRECISION: u32 = 2;

/// One raw network-frequency measurement, in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub hertz: f64,
}

impl Reading {
    pub fn new(hertz: f64) -> Self {
        Self { hertz }
    }

    /// Render the reading as wire text: fixed two-decimal form.
    pub fn to_payload(self) -> String {
        format!("{:.1$}", self.hertz, FREQUENCY_PRECISION as usize)
    }

    /// Truncate toward the nearest lower hundredth.
    ///
    /// This is floor-based truncation, not rounding: `49.567 -> 49.56`,
    /// `50.004 -> 50.00`. Idempotent on already-normalized values.
    pub fn normalize(self) -> NormalizedReading {
        NormalizedReading {
            hertz: (self.hertz * 100.0).floor() / 100.0,
        }
    }
}

/// Interpret a message payload as a reading.
///
/// Malformed payloads are a first-class outcome, not an error: whether to
/// commit the offset for them is a policy decision at the call site.
pub fn parse_payload(payload: &[u8]) -> ParseOutcome {
    let Ok(text) = std::str::from_utf8(payload) else {
        return ParseOutcome::Malformed {
            payload: String::from_utf8_lossy(payload).into_owned(),
        };
    };
    match text.trim().parse::<f64>() {
        Ok(hertz) if hertz.is_finite() => ParseOutcome::Parsed(Reading::new(hertz)),
        _ => ParseOutcome::Malformed {
            payload: text.to_string(),
        },
    }
}

/// Result of interpreting one message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Payload was valid decimal text.
    Parsed(Reading),
    /// Payload could not be interpreted; the raw text is kept for logging.
    Malformed { payload: String },
}

/// A reading after normalization. Guaranteed to carry at most two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    pub hertz: f64,
}

impl std::fmt::Display for NormalizedReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1$}", self.hertz, FREQUENCY_PRECISION as usize)
    }
}

/// Classification result for one normalized reading.
///
/// Ephemeral: exists only within one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyVerdict {
    /// The reading the verdict was computed for.
    pub reading: NormalizedReading,
    /// Whether the external classifier flagged it.
    pub is_anomaly: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_truncates() {
        assert_eq!(Reading::new(49.567).normalize().hertz, 49.56);
        assert_eq!(Reading::new(50.004).normalize().hertz, 50.00);
        assert_eq!(Reading::new(49.995).normalize().hertz, 49.99);
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in [49.567, 50.004, 52.999, 49.0, 53.0] {
            let once = Reading::new(raw).normalize();
            let twice = Reading::new(once.hertz).normalize();
            assert_eq!(once, twice, "normalize must be idempotent for {raw}");
        }
    }

    #[test]
    fn test_payload_round_trip() {
        let reading = Reading::new(50.123456);
        let payload = reading.to_payload();
        assert_eq!(payload, "50.12");
        match parse_payload(payload.as_bytes()) {
            ParseOutcome::Parsed(parsed) => assert_eq!(parsed.hertz, 50.12),
            ParseOutcome::Malformed { .. } => panic!("round trip must parse"),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["not-a-number", "", "NaN", "inf", "49.9.9"] {
            assert!(
                matches!(parse_payload(bad.as_bytes()), ParseOutcome::Malformed { .. }),
                "{bad:?} must be malformed"
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        match parse_payload(b" 50.01 \n") {
            ParseOutcome::Parsed(reading) => assert_eq!(reading.hertz, 50.01),
            ParseOutcome::Malformed { .. } => panic!("padded payload must parse"),
        }
    }

    #[test]
    fn test_display_fixed_precision() {
        let normalized = Reading::new(50.0).normalize();
        assert_eq!(normalized.to_string(), "50.00");
    }
}
