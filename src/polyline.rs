//! Route geometries.
//!
//! The provider ships geometry as an encoded polyline string, which is passed
//! untouched into the static map URL once it decodes cleanly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coordinate precision of the encoded polyline format (5 decimal places).
const PRECISION: f64 = 1e5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("invalid polyline character at byte {index}")]
    InvalidChar { index: usize },

    #[error("polyline ends mid-value")]
    Truncated,

    #[error("polyline coordinate overflows")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPolyline(String);

impl EncodedPolyline {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Polyline, PolylineError> {
        let bytes = self.0.as_bytes();
        let mut index = 0;
        let mut lat = 0i64;
        let mut lng = 0i64;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat = lat
                .checked_add(next_value(bytes, &mut index)?)
                .ok_or(PolylineError::Overflow)?;
            lng = lng
                .checked_add(next_value(bytes, &mut index)?)
                .ok_or(PolylineError::Overflow)?;
            points.push((lat as f64 / PRECISION, lng as f64 / PRECISION));
        }

        Ok(Polyline::new(points))
    }
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result = 0i64;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidChar { index: *index });
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // zigzag
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

/// A decoded route geometry as (latitude, longitude) points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
