use chrono::{DateTime, Duration, Utc};

use super::types::{ComponentKind, TemporalValue};

/// A content line kept verbatim so its value type can be decided later.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawProperty {
    pub name: String,
    pub params: Vec<(String, Vec<String>)>,
    pub value: Option<String>,
}

impl RawProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            value: Some(value.into()),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), vec![value.into()]));
        self
    }

    /// First value of a parameter, matched case-insensitively.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(|v| v.trim_matches('"'))
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().map(str::trim).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlarmComponent {
    pub uid: Option<String>,
    pub trigger: Option<RawProperty>,
    pub repeat: u32,
    pub repeat_interval: Option<Duration>,
    pub acknowledged: Option<DateTime<Utc>>,
}

/// A VEVENT, VTODO or VJOURNAL as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub kind: ComponentKind,
    pub uid: Option<String>,
    pub sequence: Option<i64>,
    pub start: Option<TemporalValue>,
    /// DTEND for events, DUE for to-dos.
    pub end: Option<TemporalValue>,
    pub duration: Option<Duration>,
    pub recurrence_id: Option<TemporalValue>,
    pub rrules: Vec<String>,
    pub rdates: Vec<TemporalValue>,
    pub exdates: Vec<TemporalValue>,
    pub alarms: Vec<AlarmComponent>,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            uid: None,
            sequence: None,
            start: None,
            end: None,
            duration: None,
            recurrence_id: None,
            rrules: Vec::new(),
            rdates: Vec::new(),
            exdates: Vec::new(),
            alarms: Vec::new(),
        }
    }

    pub fn is_override(&self) -> bool {
        self.recurrence_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Calendar {
    pub components: Vec<Component>,
}

impl Calendar {
    pub fn components_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }
}
