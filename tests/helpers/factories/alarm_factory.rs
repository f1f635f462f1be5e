use crate::recurrence::{Alarm, TemporalValue, Trigger};

pub struct AlarmFactory {
    uid: Option<String>,
    triggers: Vec<Trigger>,
}

impl AlarmFactory {
    pub fn new() -> Self {
        Self {
            uid: Some("a1".into()),
            triggers: Vec::new(),
        }
    }

    pub fn uid(mut self, uid: Option<&str>) -> Self {
        self.uid = uid.map(str::to_string);
        self
    }

    pub fn trigger(mut self, at: TemporalValue) -> Self {
        self.triggers.push(Trigger {
            at,
            acknowledged: false,
        });
        self
    }

    pub fn acknowledged_trigger(mut self, at: TemporalValue) -> Self {
        self.triggers.push(Trigger {
            at,
            acknowledged: true,
        });
        self
    }

    pub fn create(self) -> Alarm {
        Alarm {
            uid: self.uid,
            triggers: self.triggers,
        }
    }
}
