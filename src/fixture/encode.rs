use serde::{Deserialize, Deserializer, Serialize};

use super::normalize::{NormalizedTime, normalize, normalize_value};
use crate::recurrence::{ComponentKind, Occurrence};

/// Fixture record of one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedOccurrence {
    pub start: NormalizedTime,
    /// Outer `None`: no end key (journals). `Some(None)`: an explicit null.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub end: Option<Option<NormalizedTime>>,
    #[serde(rename = "recurrence-id")]
    pub recurrence_id: NormalizedTime,
    pub uid: String,
    pub sequence: i64,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl EncodedOccurrence {
    pub fn end(&self) -> Option<&NormalizedTime> {
        self.end.as_ref().and_then(Option::as_ref)
    }
}

/// Encodes an occurrence. Occurrences without a recurrence id use their own
/// start as the marker; journals never carry an end.
pub fn encode(occurrence: &Occurrence) -> EncodedOccurrence {
    let end = match occurrence.kind {
        ComponentKind::Journal => None,
        _ => Some(normalize(occurrence.end.as_ref())),
    };

    EncodedOccurrence {
        start: normalize_value(&occurrence.start),
        end,
        recurrence_id: normalize_value(occurrence.recurrence_id.as_ref().unwrap_or(&occurrence.start)),
        uid: occurrence.uid.clone().unwrap_or_default(),
        sequence: occurrence.sequence.unwrap_or(0),
    }
}
