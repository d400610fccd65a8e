use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::IgnoredAny;

/// One simulated tau decay with its antenna array.
///
/// Positions are in meters in the local frame of `origin` (x north, y west,
/// z up). Any missing or malformed field fails deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    /// `(latitude, longitude)` in degrees.
    pub origin: (f64, f64),
    pub tau_at_decay: TauAtDecay,
    pub decay: Vec<DecayProduct>,
    pub antennas: Vec<Antenna>,
    #[serde(default)]
    pub time_peaks: Option<Vec<f64>>,
}

/// Tau state at decay. Stored upstream as a 6-tuple; only the position and
/// the direction are kept.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(from = "RawTauAtDecay")]
pub struct TauAtDecay {
    pub position: [f64; 3],
    pub direction: [f64; 3],
}

type RawTauAtDecay = (
    IgnoredAny,
    IgnoredAny,
    [f64; 3],
    [f64; 3],
    IgnoredAny,
    IgnoredAny,
);

impl From<RawTauAtDecay> for TauAtDecay {
    fn from((_, _, position, direction, _, _): RawTauAtDecay) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// `[pid, [px, py, pz]]`
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(from = "(i64, [f64; 3])")]
pub struct DecayProduct {
    pub pid: i64,
    pub momentum: [f64; 3],
}

impl DecayProduct {
    pub fn new(pid: i64, momentum: [f64; 3]) -> Self {
        Self { pid, momentum }
    }
}

impl From<(i64, [f64; 3])> for DecayProduct {
    fn from((pid, momentum): (i64, [f64; 3])) -> Self {
        Self::new(pid, momentum)
    }
}

/// Antenna row; columns past the position are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Antenna {
    pub position: [f64; 3],
}

impl Antenna {
    pub fn new(position: [f64; 3]) -> Self {
        Self { position }
    }
}

impl TryFrom<Vec<f64>> for Antenna {
    type Error = String;

    fn try_from(row: Vec<f64>) -> Result<Self, Self::Error> {
        match row.as_slice() {
            [x, y, z, ..] => Ok(Self::new([*x, *y, *z])),
            _ => Err(format!(
                "antenna row needs at least 3 values, got {}",
                row.len()
            )),
        }
    }
}

#[derive(Debug)]
pub enum EventError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        /// Zero-based position of the failing event in the file.
        index: usize,
        source: serde_json::Error,
    },
    IndexOutOfRange {
        index: usize,
        count: usize,
    },
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::Io { path, source } => {
                write!(f, "failed to read events {}: {source}", path.display())
            }
            EventError::Parse { index, source } => {
                write!(f, "failed to parse event #{index}: {source}")
            }
            EventError::IndexOutOfRange { index, count } => {
                write!(f, "event #{index} requested but the file holds {count}")
            }
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventError::Io { source, .. } => Some(source),
            EventError::Parse { source, .. } => Some(source),
            EventError::IndexOutOfRange { .. } => None,
        }
    }
}

impl Event {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Parse a stream of whitespace-separated JSON events (a single object or JSON lines).
pub fn parse_events(payload: &str) -> Result<Vec<Event>, EventError> {
    let mut events = Vec::new();
    for item in serde_json::Deserializer::from_str(payload).into_iter::<Event>() {
        let event = item.map_err(|source| EventError::Parse {
            index: events.len(),
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<Event>, EventError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|source| EventError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_events(&payload)
}

pub fn load_event(path: impl AsRef<Path>, index: usize) -> Result<Event, EventError> {
    let mut events = load_events(path)?;
    let count = events.len();
    if index >= count {
        return Err(EventError::IndexOutOfRange { index, count });
    }
    Ok(events.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::{Antenna, DecayProduct, Event, EventError, load_event, parse_events};
    use pretty_assertions::assert_eq;

    const EVENT: &str = r#"{
        "origin": [42.928056, 86.741667],
        "tau_at_decay": [1.0e9, 0.0, [1000.0, -2000.0, 3000.0], [0.6, 0.8, 0.0], 12.5, null],
        "decay": [[16, [0.0, 0.0, 1.0]], [-211, [3.0, 4.0, 0.0]]],
        "antennas": [[0.0, 0.0, 2500.0, 17.0], [100.0, 200.0, 2600.0]],
        "time_peaks": [1.5, 2.5]
    }"#;

    #[test]
    fn parses_a_full_event() {
        let event = Event::from_json_str(EVENT).expect("parse");
        assert_eq!(event.origin, (42.928056, 86.741667));
        assert_eq!(event.tau_at_decay.position, [1000.0, -2000.0, 3000.0]);
        assert_eq!(event.tau_at_decay.direction, [0.6, 0.8, 0.0]);
        assert_eq!(
            event.decay,
            vec![
                DecayProduct::new(16, [0.0, 0.0, 1.0]),
                DecayProduct::new(-211, [3.0, 4.0, 0.0]),
            ]
        );
        assert_eq!(
            event.antennas,
            vec![
                Antenna::new([0.0, 0.0, 2500.0]),
                Antenna::new([100.0, 200.0, 2600.0]),
            ]
        );
        assert_eq!(event.time_peaks, Some(vec![1.5, 2.5]));
    }

    #[test]
    fn time_peaks_are_optional() {
        let absent = EVENT.replace("\"time_peaks\": [1.5, 2.5]", "\"run\": 7");
        let parsed = Event::from_json_str(&absent).expect("parse");
        assert_eq!(parsed.time_peaks, None);

        let null = EVENT.replace("[1.5, 2.5]", "null");
        let parsed = Event::from_json_str(&null).expect("parse");
        assert_eq!(parsed.time_peaks, None);
    }

    #[test]
    fn missing_required_field_fails() {
        let payload = EVENT.replace("\"decay\"", "\"decays\"");
        let err = Event::from_json_str(&payload).expect_err("decay missing");
        assert!(err.to_string().contains("decay"), "{err}");
    }

    #[test]
    fn short_antenna_rows_fail() {
        let payload = EVENT.replace("[100.0, 200.0, 2600.0]", "[100.0, 200.0]");
        assert!(Event::from_json_str(&payload).is_err());
    }

    #[test]
    fn parses_json_lines_and_reports_failing_index() {
        let one_line = EVENT.replace('\n', " ");
        let payload = format!("{one_line}\n{one_line}\n");
        assert_eq!(parse_events(&payload).expect("two events").len(), 2);

        let broken = format!("{one_line}\n{{\"origin\": [0.0, 0.0]}}\n");
        match parse_events(&broken) {
            Err(EventError::Parse { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn load_event_checks_the_index() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.json");
        std::fs::write(&path, EVENT).expect("write");

        assert!(load_event(&path, 0).is_ok());
        match load_event(&path, 3) {
            Err(EventError::IndexOutOfRange { index, count }) => {
                assert_eq!((index, count), (3, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
