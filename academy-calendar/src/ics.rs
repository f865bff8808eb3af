use std::borrow::Cow;

use chrono::Duration;
use ics::{
    parameters::Value,
    properties::{Categories, DtEnd, DtStart, Summary, TzName},
    ICalendar, Standard, TimeZone,
};

use crate::{BatchSession, CalendarEvent};

pub fn ics_base<'a, S: Into<Cow<'a, str>>>(name: S) -> ICalendar<'a> {
    // India has no daylight saving
    let mut ist_standard = Standard::new("19700101T000000", "+0530", "+0530");
    ist_standard.push(TzName::new("IST"));

    let timezone = TimeZone::standard("Asia/Kolkata", ist_standard);

    let mut ics = ICalendar::new("2.0", name);
    ics.add_timezone(timezone);

    ics
}

impl CalendarEvent {
    /// All-day entry spanning `date` only. `index` keeps the UID unique when
    /// identical events repeat.
    #[must_use]
    pub fn to_ics(&self, index: usize) -> ics::Event<'_> {
        let start = self.date.format("%Y%m%d").to_string();
        let end = (self.date + Duration::days(1)).format("%Y%m%d").to_string();

        let id = format!("{}_{}_{}_{}", start, self.kind, self.name.replace(' ', "-"), index);

        let mut ics_event = ics::Event::new(id, format!("{start}T000000"));

        let mut dtstart = DtStart::new(start);
        dtstart.add(Value::new("DATE"));
        ics_event.push(dtstart);

        let mut dtend = DtEnd::new(end);
        dtend.add(Value::new("DATE"));
        ics_event.push(dtend);

        ics_event.push(Summary::new(&self.name));
        ics_event.push(Categories::new(self.kind.label()));

        ics_event
    }
}

impl BatchSession {
    #[must_use]
    pub fn to_ics(&self, index: usize) -> ics::Event<'_> {
        let start = format!(
            "{}T{}00",
            self.date.format("%Y%m%d"),
            self.time.format("%H%M")
        );

        let id = format!("{}_{}_{}", start, self.name.replace(' ', "-"), index);

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(Summary::new(&self.name));
        ics_event.push(Categories::new("Batch"));

        ics_event
    }
}

pub fn to_ics<'a>(name: &'a str, events: &'a [CalendarEvent], batches: &'a [BatchSession]) -> ICalendar<'a> {
    let mut icalendar = ics_base(name);

    for (index, event) in events.iter().enumerate() {
        icalendar.add_event(event.to_ics(index));
    }

    for (index, batch) in batches.iter().enumerate() {
        icalendar.add_event(batch.to_ics(index));
    }

    icalendar
}
