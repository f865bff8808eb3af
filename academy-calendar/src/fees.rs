use std::fmt;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Days past the due date before an unpaid fee counts as overdue.
pub const OVERDUE_GRACE_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FeeStatus {
    Paid,
    Partial,
    Pending,
    Overdue,
}

impl FeeStatus {
    pub fn classify(total: u64, paid: u64, due_date: NaiveDate, today: NaiveDate) -> Self {
        if paid >= total {
            return FeeStatus::Paid;
        }
        if (today - due_date).num_days() >= OVERDUE_GRACE_DAYS {
            return FeeStatus::Overdue;
        }
        if paid > 0 {
            FeeStatus::Partial
        } else {
            FeeStatus::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeeStatus::Paid => "paid",
            FeeStatus::Partial => "partial",
            FeeStatus::Pending => "pending",
            FeeStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's billing record. Amounts are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeeRecord {
    pub id: u64,
    pub student: String,
    pub total_amount: u64,
    pub paid_amount: u64,
    pub due_date: NaiveDate,
}

impl FeeRecord {
    pub fn outstanding(&self) -> u64 {
        self.total_amount.saturating_sub(self.paid_amount)
    }

    pub fn status(&self, today: NaiveDate) -> FeeStatus {
        FeeStatus::classify(self.total_amount, self.paid_amount, self.due_date, today)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FeeSummary {
    pub collected: u64,
    pub pending: u64,
    pub overdue: u64,
}

impl FeeSummary {
    pub fn from_records(records: &[FeeRecord], today: NaiveDate) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.collected += record.paid_amount.min(record.total_amount);
            match record.status(today) {
                FeeStatus::Overdue => summary.overdue += record.outstanding(),
                FeeStatus::Partial | FeeStatus::Pending => summary.pending += record.outstanding(),
                FeeStatus::Paid => {}
            }
            summary
        })
    }
}

/// `None` keeps every record, like the "all" tab.
pub fn filter_fees(records: &[FeeRecord], status: Option<FeeStatus>, today: NaiveDate) -> Vec<&FeeRecord> {
    records
        .iter()
        .filter(|record| status.map_or(true, |status| record.status(today) == status))
        .collect()
}
