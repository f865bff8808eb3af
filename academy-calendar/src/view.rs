//! Screen states for the owner views.
//!
//! Each screen is exactly one variant, so a detail view and an add form
//! can never be open at the same time.

use crate::{Batch, CalendarEvent, EventDraft, Error, Result, RosterEditor};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CalendarScreen {
    #[default]
    Month,
    AddEvent(EventDraft),
}

impl CalendarScreen {
    pub fn name(&self) -> &'static str {
        match self {
            CalendarScreen::Month => "month",
            CalendarScreen::AddEvent(_) => "add event",
        }
    }

    pub fn submit(&self) -> Result<CalendarEvent> {
        match self {
            CalendarScreen::AddEvent(draft) => draft.to_event(),
            CalendarScreen::Month => Err(Error::InvalidTransition {
                action: "submit an event",
                screen: self.name(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchesScreen {
    List { search: String },
    AddForm,
    Detail { batch_id: u64 },
    Editing { batch_id: u64, roster: RosterEditor },
}

impl Default for BatchesScreen {
    fn default() -> Self {
        BatchesScreen::List {
            search: String::new(),
        }
    }
}

impl BatchesScreen {
    pub fn name(&self) -> &'static str {
        match self {
            BatchesScreen::List { .. } => "batch list",
            BatchesScreen::AddForm => "new batch",
            BatchesScreen::Detail { .. } => "batch detail",
            BatchesScreen::Editing { .. } => "batch editing",
        }
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            screen: self.name(),
        }
    }

    pub fn set_search<S: Into<String>>(&mut self, term: S) -> Result<()> {
        match self {
            BatchesScreen::List { search } => {
                *search = term.into();
                Ok(())
            }
            _ => Err(self.invalid("search")),
        }
    }

    /// Batches shown by the list screen; empty on every other screen.
    pub fn visible_batches<'a>(&self, batches: &'a [Batch]) -> Vec<&'a Batch> {
        let BatchesScreen::List { search } = self else {
            return Vec::new();
        };
        let needle = search.trim().to_lowercase();
        batches
            .iter()
            .filter(|batch| batch.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn open(&mut self, batch_id: u64) -> Result<()> {
        match self {
            BatchesScreen::List { .. } => {
                *self = BatchesScreen::Detail { batch_id };
                Ok(())
            }
            _ => Err(self.invalid("open a batch")),
        }
    }

    pub fn open_add_form(&mut self) -> Result<()> {
        match self {
            BatchesScreen::List { .. } => {
                *self = BatchesScreen::AddForm;
                Ok(())
            }
            _ => Err(self.invalid("open the new batch form")),
        }
    }

    pub fn start_editing(&mut self, batch: &Batch) -> Result<()> {
        match self {
            BatchesScreen::Detail { batch_id } if *batch_id == batch.id => {
                *self = BatchesScreen::Editing {
                    batch_id: batch.id,
                    roster: RosterEditor::begin(batch),
                };
                Ok(())
            }
            _ => Err(self.invalid("edit a batch")),
        }
    }

    pub fn roster_mut(&mut self) -> Option<&mut RosterEditor> {
        match self {
            BatchesScreen::Editing { roster, .. } => Some(roster),
            _ => None,
        }
    }

    /// Leaves editing and hands back the committed roster.
    pub fn save(&mut self) -> Result<(u64, Vec<String>)> {
        let (batch_id, students) = match self {
            BatchesScreen::Editing { batch_id, roster } => (*batch_id, roster.clone().commit()),
            _ => return Err(self.invalid("save")),
        };
        *self = BatchesScreen::Detail { batch_id };
        Ok((batch_id, students))
    }

    pub fn cancel_edit(&mut self) -> Result<()> {
        match self {
            BatchesScreen::Editing { batch_id, .. } => {
                *self = BatchesScreen::Detail {
                    batch_id: *batch_id,
                };
                Ok(())
            }
            _ => Err(self.invalid("cancel editing")),
        }
    }

    /// The back button. Editing steps back to the detail view without saving.
    pub fn back(&mut self) {
        let previous = match self {
            BatchesScreen::Editing { batch_id, .. } => BatchesScreen::Detail {
                batch_id: *batch_id,
            },
            _ => BatchesScreen::default(),
        };
        *self = previous;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveTime, Weekday};

    use super::*;

    fn batch(id: u64, name: &str, capacity: usize, students: &[&str]) -> Batch {
        Batch {
            id,
            name: name.into(),
            capacity,
            start: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
            coach: "Rajesh Kumar".into(),
            location: "Court 1".into(),
            students: students.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn list_search_filters_by_name() {
        let batches = vec![
            batch(1, "Morning Batch A", 20, &[]),
            batch(2, "Evening Batch B", 25, &[]),
            batch(3, "Weekend Batch", 15, &[]),
        ];
        let mut screen = BatchesScreen::default();
        assert_eq!(screen.visible_batches(&batches).len(), 3);

        screen.set_search("EVENING").unwrap();
        let visible: Vec<_> = screen.visible_batches(&batches).iter().map(|b| b.id).collect();
        assert_eq!(visible, vec![2]);

        screen.open(2).unwrap();
        assert!(screen.visible_batches(&batches).is_empty());
        assert!(screen.set_search("x").is_err());
    }

    #[test]
    fn edit_then_save_returns_roster() {
        let morning = batch(1, "Morning Batch A", 3, &["Arjun Mehta"]);
        let mut screen = BatchesScreen::default();
        screen.open(1).unwrap();
        screen.start_editing(&morning).unwrap();

        let roster = screen.roster_mut().unwrap();
        roster.add("Kavya Sharma").unwrap();
        roster.remove("Arjun Mehta");

        let (id, students) = screen.save().unwrap();
        assert_eq!(id, 1);
        assert_eq!(students, vec!["Kavya Sharma".to_string()]);
        assert_eq!(screen, BatchesScreen::Detail { batch_id: 1 });
    }

    #[test]
    fn cancel_discards_changes() {
        let morning = batch(1, "Morning Batch A", 3, &["Arjun Mehta"]);
        let mut screen = BatchesScreen::default();
        screen.open(1).unwrap();
        screen.start_editing(&morning).unwrap();
        screen.roster_mut().unwrap().add("Kavya Sharma").unwrap();

        screen.cancel_edit().unwrap();
        assert_eq!(screen, BatchesScreen::Detail { batch_id: 1 });
        assert_eq!(morning.students, vec!["Arjun Mehta".to_string()]);
    }

    #[test]
    fn illegal_transitions_leave_state_alone() {
        let morning = batch(1, "Morning Batch A", 3, &[]);
        let mut screen = BatchesScreen::default();

        assert!(matches!(screen.save(), Err(Error::InvalidTransition { .. })));
        assert!(screen.start_editing(&morning).is_err());
        assert_eq!(screen, BatchesScreen::default());

        screen.open(2).unwrap();
        assert!(screen.start_editing(&morning).is_err());
        assert!(screen.open_add_form().is_err());
        assert_eq!(screen, BatchesScreen::Detail { batch_id: 2 });
    }

    #[test]
    fn back_walks_up_one_level() {
        let morning = batch(1, "Morning Batch A", 3, &[]);
        let mut screen = BatchesScreen::default();
        screen.open(1).unwrap();
        screen.start_editing(&morning).unwrap();

        screen.back();
        assert_eq!(screen, BatchesScreen::Detail { batch_id: 1 });
        screen.back();
        assert_eq!(screen, BatchesScreen::default());

        screen.open_add_form().unwrap();
        screen.back();
        assert_eq!(screen, BatchesScreen::default());
    }

    #[test]
    fn calendar_screen_submit_requires_the_form() {
        assert!(CalendarScreen::Month.submit().is_err());
        let draft = EventDraft {
            name: "Holi".into(),
            date: "2026-03-08".into(),
            kind: Some(crate::EventKind::Holiday),
        };
        assert!(CalendarScreen::AddEvent(draft).submit().is_ok());
    }
}
