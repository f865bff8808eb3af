use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),

    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("`{0}` is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("batch is full ({capacity} students)")]
    RosterFull { capacity: usize },

    #[error("{0} is already enrolled")]
    AlreadyEnrolled(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("cannot {action} from the {screen} screen")]
    InvalidTransition {
        action: &'static str,
        screen: &'static str,
    },

    #[error("repository unavailable: {0}")]
    Repository(String),
}

impl Error {
    /// HTTP status code a feed should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::InvalidDate(_)
            | Error::MissingField(_)
            | Error::RosterFull { .. }
            | Error::AlreadyEnrolled(_) => 400,
            Error::NotFound(_) => 404,
            Error::InvalidTransition { .. } => 409,
            Error::Repository(_) => 500,
        }
    }
}
