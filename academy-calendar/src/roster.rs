use crate::{Batch, Error, Result};

/// Uncommitted edit of a batch's enrolled students.
///
/// Nothing reaches the batch until [`RosterEditor::commit`]; dropping the
/// editor discards every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEditor {
    capacity: usize,
    original: Vec<String>,
    enrolled: Vec<String>,
}

impl RosterEditor {
    pub fn new(capacity: usize, enrolled: Vec<String>) -> Self {
        Self {
            capacity,
            original: enrolled.clone(),
            enrolled,
        }
    }

    pub fn begin(batch: &Batch) -> Self {
        Self::new(batch.capacity, batch.students.clone())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn enrolled(&self) -> &[String] {
        &self.enrolled
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity.saturating_sub(self.enrolled.len())
    }

    pub fn is_enrolled(&self, name: &str) -> bool {
        self.enrolled.iter().any(|enrolled| enrolled == name)
    }

    pub fn is_dirty(&self) -> bool {
        self.enrolled != self.original
    }

    pub fn add<S: Into<String>>(&mut self, name: S) -> Result<()> {
        let name = name.into();
        if self.enrolled.len() >= self.capacity {
            return Err(Error::RosterFull {
                capacity: self.capacity,
            });
        }
        if self.is_enrolled(&name) {
            return Err(Error::AlreadyEnrolled(name));
        }
        self.enrolled.push(name);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.enrolled.len();
        self.enrolled.retain(|enrolled| enrolled != name);
        self.enrolled.len() != before
    }

    /// Students from `pool` that could still be added, narrowed by a
    /// case-insensitive substring search.
    pub fn available<'a, S: AsRef<str>>(&self, pool: &'a [S], search: &str) -> Vec<&'a str> {
        let needle = search.trim().to_lowercase();
        pool.iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.is_enrolled(name))
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn commit(self) -> Vec<String> {
        self.enrolled
    }

    pub fn discard(self) -> Vec<String> {
        self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: [&str; 5] = ["Arjun Mehta", "Kavya Sharma", "Rohan Patel", "Priya Singh", "Ananya Rao"];

    fn editor(capacity: usize, names: &[&str]) -> RosterEditor {
        RosterEditor::new(capacity, names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn add_is_rejected_at_capacity() {
        let mut roster = editor(2, &["Arjun Mehta", "Kavya Sharma"]);
        assert_eq!(roster.add("Rohan Patel"), Err(Error::RosterFull { capacity: 2 }));
        assert_eq!(roster.enrolled().len(), 2);
        assert!(!roster.is_dirty());
    }

    #[test]
    fn add_is_rejected_for_enrolled_student() {
        let mut roster = editor(5, &["Arjun Mehta"]);
        assert_eq!(
            roster.add("Arjun Mehta"),
            Err(Error::AlreadyEnrolled("Arjun Mehta".into()))
        );
        assert_eq!(roster.enrolled(), ["Arjun Mehta"]);
    }

    #[test]
    fn add_appends_in_order() {
        let mut roster = editor(3, &["Arjun Mehta"]);
        roster.add("Priya Singh").unwrap();
        roster.add("Kavya Sharma").unwrap();
        assert_eq!(roster.enrolled(), ["Arjun Mehta", "Priya Singh", "Kavya Sharma"]);
        assert_eq!(roster.remaining_capacity(), 0);
    }

    #[test]
    fn removed_student_becomes_available_again() {
        let mut roster = editor(3, &["Arjun Mehta", "Rohan Patel"]);
        assert!(!roster.available(&POOL, "rohan").contains(&"Rohan Patel"));

        assert!(roster.remove("Rohan Patel"));
        assert_eq!(roster.enrolled().len(), 1);
        assert_eq!(roster.available(&POOL, "rohan"), vec!["Rohan Patel"]);
        assert!(roster.available(&POOL, "kavya").iter().all(|n| *n != "Rohan Patel"));
    }

    #[test]
    fn remove_of_unknown_student_is_a_noop() {
        let mut roster = editor(3, &["Arjun Mehta"]);
        assert!(!roster.remove("Nobody"));
        assert_eq!(roster.enrolled().len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_and_skips_enrolled() {
        let roster = editor(5, &["Priya Singh"]);
        assert_eq!(roster.available(&POOL, "SH"), vec!["Kavya Sharma"]);
        assert_eq!(roster.available(&POOL, "a r"), vec!["Ananya Rao"]);
        assert_eq!(
            roster.available(&POOL, ""),
            vec!["Arjun Mehta", "Kavya Sharma", "Rohan Patel", "Ananya Rao"]
        );
    }

    #[test]
    fn discard_reverts_to_snapshot() {
        let mut roster = editor(4, &["Arjun Mehta"]);
        roster.add("Kavya Sharma").unwrap();
        roster.remove("Arjun Mehta");
        assert!(roster.is_dirty());
        assert_eq!(roster.clone().commit(), vec!["Kavya Sharma".to_string()]);
        assert_eq!(roster.discard(), vec!["Arjun Mehta".to_string()]);
    }
}
