use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{BatchSession, CalendarEvent, EventKind, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub batches: Vec<BatchSession>,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }

    pub fn has_content(&self) -> bool {
        !self.events.is_empty() || !self.batches.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonthGrid {
    pub month: YearMonth,
    pub label: String,
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(
        month: YearMonth,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        events: &[CalendarEvent],
        batches: &[BatchSession],
    ) -> Self {
        let cells = (1..=month.days_in_month())
            .filter_map(|day| {
                let date = month.date(day)?;
                Some(DayCell {
                    day,
                    date,
                    events: events.iter().filter(|e| e.date == date).cloned().collect(),
                    batches: batches.iter().filter(|b| b.date == date).cloned().collect(),
                    is_today: date == today,
                    is_selected: selected == Some(date),
                })
            })
            .collect();

        Self {
            month,
            label: month.label(),
            leading_blanks: month.first_weekday(),
            cells,
        }
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.cells.get(day.checked_sub(1)? as usize)
    }

    /// Rows of seven starting on Sunday; `None` marks a blank before the 1st.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let blanks = (0..self.leading_blanks).map(|_| None);
        let slots: Vec<_> = blanks.chain(self.cells.iter().map(Some)).collect();
        slots.chunks(7).map(<[_]>::to_vec).collect()
    }
}
