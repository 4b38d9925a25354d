//! Log-price point estimates and RMSE bands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of the band placed around a log-price estimate.
///
/// The band is a fixed multiple of the in-sample RMSE around the point
/// prediction. It is a normal approximation on the residuals only; it does
/// not account for coefficient uncertainty and is not a calibrated
/// prediction interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Confidence {
    /// ±1 RMSE, reported as 68%.
    Standard,
    /// ±2 RMSE, reported as 95%.
    #[default]
    High,
}

impl Confidence {
    /// Number of RMSEs on each side of the estimate.
    #[inline]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::High => 2.0,
        }
    }

    /// Nominal coverage in percent.
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            Self::Standard => 68,
            Self::High => 95,
        }
    }

    /// `High` when `high_confidence` is set, `Standard` otherwise.
    pub fn from_flag(high_confidence: bool) -> Self {
        if high_confidence {
            Self::High
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.level())
    }
}

/// A log-price estimate with a symmetric band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogEstimate {
    pub estimate: f64,
    pub upper: f64,
    pub lower: f64,
    pub confidence: Confidence,
}

impl LogEstimate {
    /// Place a band of `confidence.multiplier() × rmse` around `estimate`.
    pub fn new(estimate: f64, rmse: f64, confidence: Confidence) -> Self {
        let half_width = confidence.multiplier() * rmse;
        Self {
            estimate,
            upper: estimate + half_width,
            lower: estimate - half_width,
            confidence,
        }
    }

    /// `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
