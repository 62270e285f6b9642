use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ParkResult;

/// Opaque spot identifier, stable across requests.
///
/// Backends hand out either integer or string ids. The id is echoed back in
/// the same JSON shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpotId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotId::Number(n) => write!(f, "{}", n),
            SpotId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for SpotId {
    fn from(id: u64) -> Self {
        SpotId::Number(id)
    }
}

impl From<&str> for SpotId {
    fn from(id: &str) -> Self {
        SpotId::Text(id.to_string())
    }
}

/// One physical parking space as reported by `GET /parking-spots`.
///
/// Records are an immutable snapshot of the backend state at fetch time. A
/// booking never flips `is_occupied` locally; the list is re-fetched instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotRecord {
    pub id: SpotId,
    pub spot_number: String,
    #[serde(default)]
    pub is_occupied: bool,
}

impl SpotRecord {
    pub fn new(id: u64, spot_number: impl Into<String>, is_occupied: bool) -> Self {
        Self {
            id: SpotId::Number(id),
            spot_number: spot_number.into(),
            is_occupied,
        }
    }
}

/// Reads a spot list in the same JSON shape the backend serves.
pub fn load_spots_from_file<P: AsRef<Path>>(path: P) -> ParkResult<Vec<SpotRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Row of `GET /reservations`.
///
/// `duration` is shown as sent; a missing or `null` value is kept as `None`
/// so one odd row does not sink the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub spot_id: SpotId,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub start_time: Option<String>,
}

/// Body of `POST /book-spot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub car_number: String,
    pub spot_id: SpotId,
    /// RFC 3339 / ISO-8601 UTC timestamp.
    pub start_time: String,
    /// Minutes, always positive.
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookingResponse {
    #[serde(default)]
    pub success: bool,
}
