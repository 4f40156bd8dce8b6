use chrono::NaiveDateTime;

/// Source of the wall-clock time used for date and time labels.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
