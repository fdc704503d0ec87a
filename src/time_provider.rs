use chrono::{DateTime, Local};

pub trait TimeProvider: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct LocalTimeProvider;

impl TimeProvider for LocalTimeProvider {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
