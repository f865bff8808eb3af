mod calendar;
mod error;
mod fees;
mod grid;
mod month;
mod repository;
mod roster;
mod structs;
mod view;

#[cfg(feature = "ics")]
mod ics;

pub use calendar::{CalendarView, DayDetails};
pub use error::{Error, Result};
pub use fees::{filter_fees, FeeRecord, FeeStatus, FeeSummary, OVERDUE_GRACE_DAYS};
pub use grid::{DayCell, MonthGrid};
pub use month::YearMonth;
pub use repository::{AcademyRepository, MockRepository};
pub use roster::RosterEditor;
pub use structs::{
    parse_date, AcademySession, Batch, BatchSession, CalendarEvent, Coach, EventDraft, EventKind,
    Student, DATE_FORMAT,
};
pub use view::{BatchesScreen, CalendarScreen};

#[cfg(feature = "ics")]
pub use crate::ics::{ics_base, to_ics};
