use chrono::{DateTime, Local, Timelike};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Clock,
    Timer,
    Alarm,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TimerState {
    pub elapsed_seconds: u64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct AlarmState {
    pub remaining_seconds: u64,
    pub running: bool,
    pub ringing: bool,
}

impl AlarmState {
    pub fn is_unset(&self) -> bool {
        self.remaining_seconds == 0 && !self.running && !self.ringing
    }

    pub fn is_active(&self) -> bool {
        self.running || self.ringing
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFrame {
    pub digits: [char; 6],
    pub needle_percent: f32,
}

impl DisplayFrame {
    pub fn zeroed() -> Self {
        Self {
            digits: ['0'; 6],
            needle_percent: 0.0,
        }
    }

    pub fn from_counter(total_seconds: u64) -> Self {
        let hours = (total_seconds / 3600) % 100;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        Self {
            digits: digit_chars(hours, minutes, seconds),
            needle_percent: needle_percent(seconds),
        }
    }

    pub fn from_wall_time(now: &DateTime<Local>) -> Self {
        let second = u64::from(now.second());
        Self {
            digits: digit_chars(u64::from(now.hour()), u64::from(now.minute()), second),
            needle_percent: needle_percent(second),
        }
    }
}

pub(crate) fn split_two_digits(value: u64) -> [char; 2] {
    let value = value % 100;
    [
        (b'0' + (value / 10) as u8) as char,
        (b'0' + (value % 10) as u8) as char,
    ]
}

fn digit_chars(hours: u64, minutes: u64, seconds: u64) -> [char; 6] {
    let h = split_two_digits(hours);
    let m = split_two_digits(minutes);
    let s = split_two_digits(seconds);
    [h[0], h[1], m[0], m[1], s[0], s[1]]
}

pub(crate) fn needle_percent(seconds: u64) -> f32 {
    (seconds % 60) as f32 * (100.0 / 60.0)
}

pub fn info_label(now: &DateTime<Local>) -> String {
    format!(
        "{}, {}",
        now.format("%b %-d").to_string().to_uppercase(),
        now.format("%a").to_string().to_uppercase()
    )
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AlarmInputError {
    #[error("alarm minutes must be a whole number")]
    NotANumber,
    #[error("alarm minutes must be greater than zero")]
    NotPositive,
}

pub(crate) fn parse_alarm_minutes(text: &str) -> Result<u64, AlarmInputError> {
    let minutes: i64 = text
        .trim()
        .parse()
        .map_err(|_| AlarmInputError::NotANumber)?;
    if minutes <= 0 {
        return Err(AlarmInputError::NotPositive);
    }
    Ok(minutes as u64)
}
