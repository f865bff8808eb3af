use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Weekday};

#[cfg(feature = "serde")]
use chrono::Timelike;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg(feature = "serde")]
fn serialize_naive_time<S: Serializer>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let formatted_time = format!("{:02}:{:02}", time.hour(), time.minute());
    serializer.serialize_str(&formatted_time)
}

#[cfg(feature = "serde")]
fn deserialize_naive_time<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
}

/// Parses a `YYYY-MM-DD` date as entered in the add-event form.
pub fn parse_date<S: AsRef<str>>(s: S) -> Result<NaiveDate> {
    let s = s.as_ref().trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EventKind {
    Holiday,
    Tournament,
    InHouseEvent,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Holiday, EventKind::Tournament, EventKind::InHouseEvent];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Holiday => "holiday",
            EventKind::Tournament => "tournament",
            EventKind::InHouseEvent => "in-house-event",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Holiday => "Holiday",
            EventKind::Tournament => "Tournament",
            EventKind::InHouseEvent => "In-house Event",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::NotFound(format!("event type `{s}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EventKind,
}

impl CalendarEvent {
    pub fn new<S: Into<String>>(date: NaiveDate, name: S, kind: EventKind) -> Self {
        Self {
            date,
            name: name.into(),
            kind,
        }
    }
}

/// Unsubmitted add-event form. Every field starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventDraft {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: String,
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub kind: Option<EventKind>,
}

impl EventDraft {
    /// Whether the submit button would be enabled.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.date.trim().is_empty() && self.kind.is_some()
    }

    pub fn to_event(&self) -> Result<CalendarEvent> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.date.trim().is_empty() {
            return Err(Error::MissingField("date"));
        }
        let kind = self.kind.ok_or(Error::MissingField("type"))?;
        let date = parse_date(&self.date)?;

        Ok(CalendarEvent::new(date, name, kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchSession {
    pub date: NaiveDate,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "serialize_naive_time", deserialize_with = "deserialize_naive_time")
    )]
    pub time: NaiveTime,
}

impl BatchSession {
    pub fn new<S: Into<String>>(date: NaiveDate, name: S, time: NaiveTime) -> Self {
        Self {
            date,
            name: name.into(),
            time,
        }
    }

    /// 12-hour clock form, e.g. `6:00 AM`.
    pub fn display_time(&self) -> String {
        self.time.format("%-I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Batch {
    pub id: u64,
    pub name: String,
    pub capacity: usize,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "serialize_naive_time", deserialize_with = "deserialize_naive_time")
    )]
    pub start: NaiveTime,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "serialize_naive_time", deserialize_with = "deserialize_naive_time")
    )]
    pub end: NaiveTime,
    pub days: Vec<Weekday>,
    pub coach: String,
    pub location: String,
    pub students: Vec<String>,
}

impl Batch {
    pub fn enrolled(&self) -> usize {
        self.students.len()
    }

    pub fn is_full(&self) -> bool {
        self.enrolled() >= self.capacity
    }

    pub fn runs_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// `6:00 AM - 7:30 AM`
    pub fn schedule(&self) -> String {
        format!("{} - {}", self.start.format("%-I:%M %p"), self.end.format("%-I:%M %p"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub guardian: String,
    pub phone: String,
    pub batch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coach {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub specialization: String,
}

/// An academic term grouping batches, e.g. "Winter 2026".
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcademySession {
    pub id: u64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub archived: bool,
}

impl AcademySession {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_every_field() {
        let mut draft = EventDraft::default();
        assert!(!draft.is_complete());
        assert_eq!(draft.to_event(), Err(Error::MissingField("name")));

        draft.name = "Republic Day".into();
        assert_eq!(draft.to_event(), Err(Error::MissingField("date")));

        draft.date = "2026-01-26".into();
        assert_eq!(draft.to_event(), Err(Error::MissingField("type")));

        draft.kind = Some(EventKind::Holiday);
        assert!(draft.is_complete());
        let event = draft.to_event().unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
        assert_eq!(event.name, "Republic Day");
    }

    #[test]
    fn draft_rejects_impossible_dates() {
        let draft = EventDraft {
            name: "Leap".into(),
            date: "2026-02-30".into(),
            kind: Some(EventKind::Tournament),
        };
        assert_eq!(draft.to_event(), Err(Error::InvalidDate("2026-02-30".into())));
    }

    #[test]
    fn event_kind_round_trips_through_text() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>(), Ok(kind));
        }
        assert!("birthday".parse::<EventKind>().is_err());
        assert_eq!(EventKind::InHouseEvent.label(), "In-house Event");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn event_serializes_with_kebab_type() {
        let event = CalendarEvent::new(
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            "Club Night",
            EventKind::InHouseEvent,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2026-02-14");
        assert_eq!(json["type"], "in-house-event");
    }

    #[test]
    fn batch_schedule_uses_twelve_hour_clock() {
        let batch = Batch {
            id: 1,
            name: "Morning Batch A".into(),
            capacity: 2,
            start: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            days: vec![Weekday::Mon],
            coach: "Rajesh Kumar".into(),
            location: "Court 1".into(),
            students: vec!["Arjun Mehta".into(), "Rohan Patel".into()],
        };
        assert_eq!(batch.schedule(), "6:00 AM - 7:30 PM");
        let session = BatchSession::new(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(), &batch.name, batch.end);
        assert_eq!(session.display_time(), "7:30 PM");
        assert!(batch.is_full());
        assert!(batch.runs_on(Weekday::Mon));
        assert!(!batch.runs_on(Weekday::Tue));
    }
}
