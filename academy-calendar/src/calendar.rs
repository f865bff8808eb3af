use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::view::CalendarScreen;
use crate::{BatchSession, CalendarEvent, EventDraft, EventKind, MonthGrid, Result, YearMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayDetails {
    pub date: NaiveDate,
    pub formatted: String,
    pub holidays: Vec<CalendarEvent>,
    pub tournaments: Vec<CalendarEvent>,
    pub in_house_events: Vec<CalendarEvent>,
    pub batches: Vec<BatchSession>,
    pub has_content: bool,
}

impl DayDetails {
    pub fn collect(date: NaiveDate, events: &[CalendarEvent], batches: &[BatchSession]) -> Self {
        let of_kind = |kind: EventKind| -> Vec<CalendarEvent> {
            events
                .iter()
                .filter(|e| e.date == date && e.kind == kind)
                .cloned()
                .collect()
        };

        let holidays = of_kind(EventKind::Holiday);
        let tournaments = of_kind(EventKind::Tournament);
        let in_house_events = of_kind(EventKind::InHouseEvent);
        let batches: Vec<_> = batches.iter().filter(|b| b.date == date).cloned().collect();
        let has_content = !(holidays.is_empty()
            && tournaments.is_empty()
            && in_house_events.is_empty()
            && batches.is_empty());

        Self {
            date,
            formatted: date.format("%A, %B %-d, %Y").to_string(),
            holidays,
            tournaments,
            in_house_events,
            batches,
            has_content,
        }
    }
}

/// Owner calendar: month navigation, single-day selection and the
/// session-local event list.
#[derive(Debug, Clone)]
pub struct CalendarView {
    month: YearMonth,
    selected: Option<NaiveDate>,
    events: Vec<CalendarEvent>,
    batches: Vec<BatchSession>,
    screen: CalendarScreen,
}

impl CalendarView {
    pub fn new(month: YearMonth, events: Vec<CalendarEvent>, batches: Vec<BatchSession>) -> Self {
        Self {
            month,
            selected: None,
            events,
            batches,
            screen: CalendarScreen::Month,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn batches(&self) -> &[BatchSession] {
        &self.batches
    }

    pub fn screen(&self) -> &CalendarScreen {
        &self.screen
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
        self.selected = None;
    }

    pub fn previous_month(&mut self) {
        self.month = self.month.previous();
        self.selected = None;
    }

    /// Toggles the selection of `day` in the displayed month.
    pub fn select_day(&mut self, day: u32) -> Option<NaiveDate> {
        let Some(date) = self.month.date(day) else {
            return self.selected;
        };
        self.selected = if self.selected == Some(date) {
            None
        } else {
            Some(date)
        };
        self.selected
    }

    pub fn grid(&self, today: NaiveDate) -> MonthGrid {
        MonthGrid::build(self.month, today, self.selected, &self.events, &self.batches)
    }

    pub fn selected_details(&self) -> Option<DayDetails> {
        self.selected
            .map(|date| DayDetails::collect(date, &self.events, &self.batches))
    }

    pub fn upcoming_events(&self, today: NaiveDate) -> Vec<&CalendarEvent> {
        let mut upcoming: Vec<_> = self.events.iter().filter(|e| e.date >= today).collect();
        upcoming.sort_by_key(|e| e.date);
        upcoming
    }

    pub fn open_add_event(&mut self) {
        self.screen = CalendarScreen::AddEvent(EventDraft::default());
    }

    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        match &mut self.screen {
            CalendarScreen::AddEvent(draft) => Some(draft),
            CalendarScreen::Month => None,
        }
    }

    /// Appends the drafted event and returns to the month screen. On a
    /// validation error the draft stays open unchanged.
    pub fn submit_event(&mut self) -> Result<&CalendarEvent> {
        let event = self.screen.submit()?;
        self.screen = CalendarScreen::Month;
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    pub fn cancel(&mut self) {
        self.screen = CalendarScreen::Month;
    }
}
