use std::sync::RwLock;

use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::{
    AcademySession, Batch, BatchSession, CalendarEvent, Coach, Error, EventKind, FeeRecord,
    Result, Student,
};

/// Read access to academy records, plus the one write the calendar needs.
pub trait AcademyRepository: Send + Sync {
    fn students(&self) -> Result<Vec<Student>>;
    fn coaches(&self) -> Result<Vec<Coach>>;
    fn batches(&self) -> Result<Vec<Batch>>;
    fn academy_sessions(&self) -> Result<Vec<AcademySession>>;
    fn batch_sessions(&self) -> Result<Vec<BatchSession>>;
    fn events(&self) -> Result<Vec<CalendarEvent>>;
    fn add_event(&self, event: CalendarEvent) -> Result<()>;
    fn fees(&self) -> Result<Vec<FeeRecord>>;

    fn batch(&self, id: u64) -> Result<Batch> {
        self.batches()?
            .into_iter()
            .find(|batch| batch.id == id)
            .ok_or_else(|| Error::NotFound(format!("batch {id}")))
    }

    /// Events within `start..=end` (either bound optional), optionally of one kind,
    /// ordered by date. Events sharing a date keep insertion order.
    fn events_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        kind: Option<EventKind>,
    ) -> Result<Vec<CalendarEvent>> {
        let mut events: Vec<_> = self
            .events()?
            .into_iter()
            .filter(|e| start.map_or(true, |start| e.date >= start))
            .filter(|e| end.map_or(true, |end| e.date <= end))
            .filter(|e| kind.map_or(true, |kind| e.kind == kind))
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}

/// In-memory sample academy. Added events live as long as the value.
#[derive(Debug)]
pub struct MockRepository {
    students: Vec<Student>,
    coaches: Vec<Coach>,
    batches: Vec<Batch>,
    academy_sessions: Vec<AcademySession>,
    batch_sessions: Vec<BatchSession>,
    events: RwLock<Vec<CalendarEvent>>,
    fees: Vec<FeeRecord>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl MockRepository {
    pub fn empty() -> Self {
        Self {
            students: Vec::new(),
            coaches: Vec::new(),
            batches: Vec::new(),
            academy_sessions: Vec::new(),
            batch_sessions: Vec::new(),
            events: RwLock::new(Vec::new()),
            fees: Vec::new(),
        }
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: RwLock::new(events),
            ..Self::empty()
        }
    }

    pub fn student_names(&self) -> Vec<String> {
        self.students.iter().map(|s| s.name.clone()).collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        let student = |id, name: &str, guardian: &str, phone: &str, batch: &str| Student {
            id,
            name: name.into(),
            guardian: guardian.into(),
            phone: phone.into(),
            batch: Some(batch.into()),
        };
        let coach = |id, name: &str, phone: &str, specialization: &str| Coach {
            id,
            name: name.into(),
            phone: phone.into(),
            specialization: specialization.into(),
        };

        Self {
            students: vec![
                student(1, "Arjun Mehta", "Mr. Vijay Mehta", "+91 98765 43210", "Morning Batch A"),
                student(2, "Kavya Sharma", "Mrs. Anjali Sharma", "+91 98765 43211", "Evening Batch B"),
                student(3, "Rohan Patel", "Mr. Ashok Patel", "+91 98765 43212", "Morning Batch A"),
                student(4, "Priya Singh", "Mr. Harish Singh", "+91 98765 43213", "Weekend Batch"),
                student(5, "Ananya Rao", "Mrs. Lakshmi Rao", "+91 98765 43214", "Evening Batch B"),
                student(6, "Vikram Nair", "Mr. Suresh Nair", "+91 98765 43215", "Weekend Batch"),
            ],
            coaches: vec![
                coach(1, "Rajesh Kumar", "+91 98765 43210", "Singles"),
                coach(2, "Priya Singh", "+91 98765 43211", "Doubles"),
                coach(3, "Amit Sharma", "+91 98765 43212", "Junior Training"),
                coach(4, "Sneha Patel", "+91 98765 43213", "Advanced"),
            ],
            batches: vec![
                Batch {
                    id: 1,
                    name: "Morning Batch A".into(),
                    capacity: 20,
                    start: time(6, 0),
                    end: time(7, 30),
                    days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
                    coach: "Rajesh Kumar".into(),
                    location: "Court 1".into(),
                    students: names(&["Arjun Mehta", "Rohan Patel"]),
                },
                Batch {
                    id: 2,
                    name: "Evening Batch B".into(),
                    capacity: 25,
                    start: time(17, 0),
                    end: time(18, 30),
                    days: vec![Weekday::Tue, Weekday::Thu, Weekday::Sat],
                    coach: "Priya Singh".into(),
                    location: "Court 2".into(),
                    students: names(&["Kavya Sharma", "Ananya Rao"]),
                },
                Batch {
                    id: 3,
                    name: "Weekend Batch".into(),
                    capacity: 2,
                    start: time(8, 0),
                    end: time(9, 30),
                    days: vec![Weekday::Sat, Weekday::Sun],
                    coach: "Amit Sharma".into(),
                    location: "Court 1".into(),
                    students: names(&["Priya Singh", "Vikram Nair"]),
                },
            ],
            academy_sessions: vec![
                AcademySession {
                    id: 1,
                    name: "Winter 2026".into(),
                    start_date: date(2026, 1, 1),
                    end_date: date(2026, 3, 31),
                    archived: false,
                },
                AcademySession {
                    id: 2,
                    name: "Autumn 2025".into(),
                    start_date: date(2025, 10, 1),
                    end_date: date(2025, 12, 31),
                    archived: true,
                },
                AcademySession {
                    id: 3,
                    name: "Summer 2025".into(),
                    start_date: date(2025, 6, 1),
                    end_date: date(2025, 9, 30),
                    archived: true,
                },
            ],
            batch_sessions: vec![
                BatchSession::new(date(2026, 1, 6), "Morning Batch A", time(6, 0)),
                BatchSession::new(date(2026, 1, 6), "Evening Batch B", time(17, 0)),
                BatchSession::new(date(2026, 1, 7), "Morning Batch A", time(6, 0)),
            ],
            events: RwLock::new(vec![
                CalendarEvent::new(date(2026, 1, 26), "Republic Day", EventKind::Holiday),
                CalendarEvent::new(date(2026, 3, 8), "Holi", EventKind::Holiday),
            ]),
            fees: vec![
                FeeRecord {
                    id: 1,
                    student: "Arjun Mehta".into(),
                    total_amount: 5000,
                    paid_amount: 2500,
                    due_date: date(2026, 1, 15),
                },
                FeeRecord {
                    id: 2,
                    student: "Kavya Sharma".into(),
                    total_amount: 5000,
                    paid_amount: 5000,
                    due_date: date(2026, 1, 10),
                },
                FeeRecord {
                    id: 3,
                    student: "Rohan Patel".into(),
                    total_amount: 5000,
                    paid_amount: 0,
                    due_date: date(2025, 12, 31),
                },
                FeeRecord {
                    id: 4,
                    student: "Priya Singh".into(),
                    total_amount: 5000,
                    paid_amount: 2500,
                    due_date: date(2026, 1, 20),
                },
            ],
        }
    }
}

impl AcademyRepository for MockRepository {
    fn students(&self) -> Result<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn coaches(&self) -> Result<Vec<Coach>> {
        Ok(self.coaches.clone())
    }

    fn batches(&self) -> Result<Vec<Batch>> {
        Ok(self.batches.clone())
    }

    fn academy_sessions(&self) -> Result<Vec<AcademySession>> {
        Ok(self.academy_sessions.clone())
    }

    fn batch_sessions(&self) -> Result<Vec<BatchSession>> {
        Ok(self.batch_sessions.clone())
    }

    fn events(&self) -> Result<Vec<CalendarEvent>> {
        self.events
            .read()
            .map(|events| events.clone())
            .map_err(|err| Error::Repository(err.to_string()))
    }

    fn add_event(&self, event: CalendarEvent) -> Result<()> {
        self.events
            .write()
            .map_err(|err| Error::Repository(err.to_string()))?
            .push(event);
        Ok(())
    }

    fn fees(&self) -> Result<Vec<FeeRecord>> {
        Ok(self.fees.clone())
    }
}
