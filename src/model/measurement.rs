//! Raw speed-test measurement.

use serde::{Deserialize, Serialize};

/// A single speed-test measurement.
///
/// Speeds are in Mbps, latency and jitter in milliseconds, packet loss and
/// obstruction in percent. `stability` is only present when the record store
/// already computed it; otherwise it is estimated from jitter, packet loss and
/// obstruction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurement {
    pub download: f64,
    pub upload: f64,
    pub latency: f64,
    pub jitter: f64,
    pub packet_loss: f64,
    /// Satellite dish obstruction percentage
    pub obstruction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
}

impl Measurement {
    /// Create a measurement with zero jitter, packet loss and obstruction.
    #[must_use]
    pub const fn new(download: f64, upload: f64, latency: f64) -> Self {
        Self {
            download,
            upload,
            latency,
            jitter: 0.0,
            packet_loss: 0.0,
            obstruction: 0.0,
            stability: None,
        }
    }

    #[must_use]
    pub const fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    #[must_use]
    pub const fn with_packet_loss(mut self, packet_loss: f64) -> Self {
        self.packet_loss = packet_loss;
        self
    }

    #[must_use]
    pub const fn with_obstruction(mut self, obstruction: f64) -> Self {
        self.obstruction = obstruction;
        self
    }

    /// Supply an already known stability score, bypassing the estimator.
    #[must_use]
    pub const fn with_stability(mut self, stability: f64) -> Self {
        self.stability = Some(stability);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let m: Measurement = serde_json::from_str(r#"{"download": 120.5}"#).expect("valid");
        assert_eq!(m.download, 120.5);
        assert_eq!(m.upload, 0.0);
        assert_eq!(m.jitter, 0.0);
        assert_eq!(m.obstruction, 0.0);
        assert!(m.stability.is_none());
    }

    #[test]
    fn test_builder() {
        let m = Measurement::new(50.0, 5.0, 35.0)
            .with_jitter(4.0)
            .with_packet_loss(0.5)
            .with_obstruction(10.0);
        assert_eq!(m.jitter, 4.0);
        assert_eq!(m.packet_loss, 0.5);
        assert_eq!(m.obstruction, 10.0);
    }
}
