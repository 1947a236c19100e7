use chrono::{DateTime, NaiveDate, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
