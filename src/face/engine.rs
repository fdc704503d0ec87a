use chrono::{DateTime, Local, Timelike};

use crate::face::model::{
    AlarmInputError, AlarmState, DisplayFrame, Mode, TimerState, info_label, parse_alarm_minutes,
    split_two_digits,
};
use crate::surface::DisplaySurface;

pub struct ClockFace<S> {
    mode: Mode,
    timer: TimerState,
    alarm: AlarmState,
    input_open: bool,
    surface: S,
}

impl<S: DisplaySurface> ClockFace<S> {
    pub fn new(surface: S) -> Self {
        Self {
            mode: Mode::Clock,
            timer: TimerState::default(),
            alarm: AlarmState::default(),
            input_open: false,
            surface,
        }
    }

    pub fn startup(&mut self, mode: Mode, now: DateTime<Local>) {
        self.set_mode(mode, now);
        let label = info_label(&now);
        self.surface.set_info_label(&label);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn alarm(&self) -> &AlarmState {
        &self.alarm
    }

    pub fn input_open(&self) -> bool {
        self.input_open
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn set_mode(&mut self, mode: Mode, now: DateTime<Local>) {
        self.mode = mode;
        self.surface.set_active_mode(mode);
        self.render(now);
    }

    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.timer.running {
            self.timer.elapsed_seconds = self.timer.elapsed_seconds.saturating_add(1);
        }

        if self.alarm.running {
            if self.alarm.remaining_seconds > 0 {
                self.alarm.remaining_seconds -= 1;
            }
            if self.alarm.remaining_seconds == 0 {
                // Ring entry happens in the same tick the countdown lands on
                // zero; running and ringing are never true together.
                self.alarm.running = false;
                self.alarm.ringing = true;
            }
        }

        self.render(now);
    }

    pub fn action(&mut self) {
        match self.mode {
            Mode::Clock => {}
            Mode::Timer => self.timer.running = !self.timer.running,
            Mode::Alarm => {
                if self.alarm.ringing {
                    self.stop_ring();
                } else if self.alarm.remaining_seconds == 0 {
                    self.open_alarm_input();
                } else {
                    self.alarm.running = !self.alarm.running;
                }
            }
        }
        self.refresh_status();
    }

    pub fn reset(&mut self) {
        match self.mode {
            Mode::Clock => {}
            Mode::Timer => {
                self.timer.running = false;
                self.timer.elapsed_seconds = 0;
                self.push_zeroed();
            }
            Mode::Alarm => {
                if self.alarm.ringing {
                    self.stop_ring();
                    self.alarm.remaining_seconds = 0;
                    self.push_zeroed();
                } else if self.alarm.remaining_seconds > 0 {
                    self.alarm.running = false;
                    self.alarm.remaining_seconds = 0;
                    self.push_zeroed();
                } else {
                    self.open_alarm_input();
                }
            }
        }
        self.refresh_status();
    }

    pub fn submit_alarm_minutes(&mut self, text: &str) -> Result<(), AlarmInputError> {
        let minutes = match parse_alarm_minutes(text) {
            Ok(minutes) => minutes,
            Err(err) => {
                self.surface.flash_input_error();
                return Err(err);
            }
        };

        self.alarm.remaining_seconds = minutes.saturating_mul(60);
        let hours = split_two_digits(minutes / 60);
        let mins = split_two_digits(minutes % 60);
        self.surface
            .set_digits([hours[0], hours[1], mins[0], mins[1], '0', '0']);
        self.input_open = false;
        self.surface.hide_alarm_input();
        self.refresh_status();
        Ok(())
    }

    pub fn cancel_alarm_input(&mut self) {
        self.input_open = false;
        self.surface.hide_alarm_input();
    }

    fn render(&mut self, now: DateTime<Local>) {
        match self.mode {
            Mode::Clock => {
                self.push_frame(DisplayFrame::from_wall_time(&now));
                if now.second() == 0 {
                    let label = info_label(&now);
                    self.surface.set_info_label(&label);
                }
            }
            Mode::Timer => self.push_frame(DisplayFrame::from_counter(self.timer.elapsed_seconds)),
            Mode::Alarm => self.push_frame(DisplayFrame::from_counter(self.alarm.remaining_seconds)),
        }

        self.surface
            .set_blink(self.mode == Mode::Alarm && self.alarm.ringing);
        self.refresh_status();
    }

    fn push_frame(&mut self, frame: DisplayFrame) {
        self.surface.set_digits(frame.digits);
        self.surface.set_needle_percent(frame.needle_percent);
    }

    fn push_zeroed(&mut self) {
        self.push_frame(DisplayFrame::zeroed());
    }

    fn stop_ring(&mut self) {
        self.alarm.running = false;
        self.alarm.ringing = false;
        self.surface.set_blink(false);
    }

    fn open_alarm_input(&mut self) {
        self.input_open = true;
        self.surface.show_alarm_input();
    }

    fn refresh_status(&mut self) {
        let led_on = match self.mode {
            Mode::Clock => true,
            Mode::Timer => self.timer.running,
            Mode::Alarm => self.alarm.is_active(),
        };
        self.surface.set_status_led(led_on);
        self.surface.set_timer_icon(self.timer.running);
        self.surface
            .set_alarm_icon(self.alarm.is_active(), self.alarm.ringing);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::surface::RecordingSurface;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 8, 6, hour, minute, second)
            .single()
            .expect("unambiguous local time")
    }

    fn face() -> ClockFace<RecordingSurface> {
        ClockFace::new(RecordingSurface::new())
    }

    fn armed_running_face(minutes: u64) -> ClockFace<RecordingSurface> {
        let mut face = face();
        face.set_mode(Mode::Alarm, at(9, 0, 0));
        face.submit_alarm_minutes(&minutes.to_string())
            .expect("valid minutes");
        face.action();
        face
    }

    #[test]
    fn clock_mode_renders_wall_time_digits() {
        let mut face = face();
        face.set_mode(Mode::Clock, at(12, 34, 56));
        assert_eq!(face.surface().digits, ['1', '2', '3', '4', '5', '6']);
        assert!((face.surface().needle_percent - 56.0 * (100.0 / 60.0)).abs() < 1e-3);
        assert_eq!(face.surface().active_mode, Some(Mode::Clock));
    }

    #[test]
    fn clock_tick_refreshes_info_label_only_on_minute_boundary() {
        let mut face = face();
        face.set_mode(Mode::Clock, at(8, 15, 30));
        assert_eq!(face.surface().info_label, "");

        face.tick(at(8, 15, 31));
        assert_eq!(face.surface().info_label, "");

        face.tick(at(8, 16, 0));
        assert_eq!(face.surface().info_label, "AUG 6, THU");
    }

    #[test]
    fn startup_fills_info_label_immediately() {
        let mut face = face();
        face.startup(Mode::Clock, at(8, 15, 30));
        assert_eq!(face.surface().info_label, "AUG 6, THU");
        assert_eq!(face.surface().active_mode, Some(Mode::Clock));
    }

    #[test]
    fn status_led_is_on_in_clock_mode_for_any_state() {
        let mut face = face();
        face.set_mode(Mode::Clock, at(10, 0, 1));
        assert!(face.surface().status_led);

        face.set_mode(Mode::Timer, at(10, 0, 2));
        face.action();
        face.set_mode(Mode::Clock, at(10, 0, 3));
        assert!(face.surface().status_led);
    }

    #[test]
    fn action_in_clock_mode_changes_nothing() {
        let mut face = face();
        face.set_mode(Mode::Clock, at(10, 0, 1));
        face.action();
        face.reset();
        assert_eq!(*face.timer(), TimerState::default());
        assert_eq!(*face.alarm(), AlarmState::default());
        assert!(!face.input_open());
    }

    #[test]
    fn timer_start_tick_reset_scenario() {
        let mut face = face();
        face.set_mode(Mode::Timer, at(10, 0, 0));
        assert!(!face.surface().status_led);
        assert!(!face.surface().timer_icon);

        face.action();
        assert!(face.timer().running);
        assert!(face.surface().status_led);
        assert!(face.surface().timer_icon);

        for second in 1..=3 {
            face.tick(at(10, 0, second));
        }
        assert_eq!(face.timer().elapsed_seconds, 3);
        assert_eq!(face.surface().digits, ['0', '0', '0', '0', '0', '3']);

        face.reset();
        assert!(!face.timer().running);
        assert_eq!(face.timer().elapsed_seconds, 0);
        assert_eq!(face.surface().digits, ['0'; 6]);
        assert_eq!(face.surface().needle_percent, 0.0);
    }

    #[test]
    fn counters_keep_advancing_while_another_mode_is_displayed() {
        let mut face = armed_running_face(2);
        face.set_mode(Mode::Timer, at(9, 0, 1));
        face.action();
        face.set_mode(Mode::Clock, at(9, 0, 2));

        face.tick(at(9, 0, 3));
        face.tick(at(9, 0, 4));

        assert_eq!(face.timer().elapsed_seconds, 2);
        assert_eq!(face.alarm().remaining_seconds, 118);
        assert!(face.timer().running);
        assert!(face.alarm().running);
    }

    #[test]
    fn mode_switch_never_alters_counters_or_flags() {
        let mut face = armed_running_face(2);
        face.set_mode(Mode::Timer, at(9, 0, 1));
        face.action();
        let timer_before = *face.timer();
        let alarm_before = *face.alarm();

        for mode in [Mode::Clock, Mode::Alarm, Mode::Timer, Mode::Clock] {
            face.set_mode(mode, at(9, 30, 15));
        }

        assert_eq!(*face.timer(), timer_before);
        assert_eq!(*face.alarm(), alarm_before);
    }

    #[test]
    fn render_pass_is_idempotent_for_fixed_state() {
        let mut face = face();
        face.set_mode(Mode::Timer, at(9, 0, 0));
        face.action();
        for second in 1..=45 {
            face.tick(at(9, 0, second));
        }
        face.action();

        face.set_mode(Mode::Timer, at(9, 1, 0));
        let first_digits = face.surface().digits;
        let first_needle = face.surface().needle_percent;

        face.set_mode(Mode::Timer, at(9, 1, 0));
        assert_eq!(face.surface().digits, first_digits);
        assert_eq!(face.surface().needle_percent, first_needle);
    }

    #[test]
    fn submit_arms_alarm_without_starting_it() {
        let mut face = face();
        face.set_mode(Mode::Alarm, at(9, 0, 0));
        face.action();
        assert!(face.input_open());

        face.submit_alarm_minutes("5").expect("five minutes");
        assert_eq!(face.alarm().remaining_seconds, 300);
        assert!(!face.alarm().running);
        assert!(!face.alarm().ringing);
        assert!(!face.input_open());
        assert!(!face.surface().input_visible);
        assert_eq!(face.surface().digits, ['0', '0', '0', '5', '0', '0']);
        assert!(!face.surface().alarm_icon);
    }

    #[test]
    fn submit_splits_hours_and_minutes_for_long_countdowns() {
        let mut face = face();
        face.set_mode(Mode::Alarm, at(9, 0, 0));
        face.submit_alarm_minutes("90").expect("ninety minutes");
        assert_eq!(face.alarm().remaining_seconds, 5_400);
        assert_eq!(face.surface().digits, ['0', '1', '3', '0', '0', '0']);
    }

    #[test]
    fn rejected_submit_leaves_state_and_keeps_input_open() {
        let mut face = face();
        face.set_mode(Mode::Alarm, at(9, 0, 0));
        face.action();

        assert_eq!(
            face.submit_alarm_minutes("abc"),
            Err(AlarmInputError::NotANumber)
        );
        assert_eq!(
            face.submit_alarm_minutes("0"),
            Err(AlarmInputError::NotPositive)
        );
        assert_eq!(face.surface().error_flashes, 2);
        assert!(face.input_open());
        assert!(face.surface().input_visible);
        assert_eq!(*face.alarm(), AlarmState::default());
    }

    #[test]
    fn countdown_rings_exactly_once_at_the_one_to_zero_tick() {
        let mut face = armed_running_face(1);

        for second in 1..=59 {
            face.tick(at(9, 0, second));
        }
        assert_eq!(face.alarm().remaining_seconds, 1);
        assert!(face.alarm().running);
        assert!(!face.alarm().ringing);

        face.tick(at(9, 1, 0));
        assert_eq!(face.alarm().remaining_seconds, 0);
        assert!(!face.alarm().running);
        assert!(face.alarm().ringing);
        assert!(face.surface().blink);
        assert!(face.surface().alarm_icon);
        assert!(face.surface().alarm_icon_blinking);

        face.tick(at(9, 1, 1));
        assert_eq!(face.alarm().remaining_seconds, 0);
        assert!(!face.alarm().running);
        assert!(face.alarm().ringing);
    }

    #[test]
    fn action_while_ringing_silences_the_alarm() {
        let mut face = armed_running_face(1);
        for second in 1..=59 {
            face.tick(at(9, 0, second));
        }
        face.tick(at(9, 1, 0));
        assert!(face.alarm().ringing);

        face.action();
        assert!(face.alarm().is_unset());
        assert!(!face.surface().blink);
        assert!(!face.surface().alarm_icon);
        assert!(!face.surface().status_led);
    }

    #[test]
    fn reset_while_ringing_zeroes_and_clears_display() {
        let mut face = armed_running_face(1);
        for second in 1..=59 {
            face.tick(at(9, 0, second));
        }
        face.tick(at(9, 1, 0));
        assert!(face.alarm().ringing);

        face.reset();
        assert!(face.alarm().is_unset());
        assert_eq!(face.surface().digits, ['0'; 6]);
        assert_eq!(face.surface().needle_percent, 0.0);
        assert!(!face.surface().blink);
        assert!(!face.input_open());
    }

    #[test]
    fn reset_on_armed_alarm_stops_and_zeroes_without_opening_input() {
        let mut face = armed_running_face(2);
        face.tick(at(9, 0, 1));

        face.reset();
        assert!(face.alarm().is_unset());
        assert_eq!(face.surface().digits, ['0'; 6]);
        assert!(!face.input_open());
    }

    #[test]
    fn action_and_reset_open_input_when_alarm_is_unset() {
        let mut face = face();
        face.set_mode(Mode::Alarm, at(9, 0, 0));

        face.action();
        assert!(face.input_open());
        face.cancel_alarm_input();
        assert!(!face.input_open());
        assert!(!face.surface().input_visible);

        face.reset();
        assert!(face.input_open());
        assert_eq!(*face.alarm(), AlarmState::default());
    }

    #[test]
    fn leaving_alarm_mode_clears_the_visible_blink_but_not_the_ring() {
        let mut face = armed_running_face(1);
        for second in 1..=59 {
            face.tick(at(9, 0, second));
        }
        face.tick(at(9, 1, 0));
        assert!(face.surface().blink);

        face.set_mode(Mode::Clock, at(9, 1, 1));
        assert!(!face.surface().blink);
        assert!(face.alarm().ringing);
        assert!(face.surface().alarm_icon);
        assert!(face.surface().alarm_icon_blinking);
        assert!(face.surface().status_led);
    }

    #[test]
    fn paused_timer_holds_its_count_across_ticks() {
        let mut face = face();
        face.set_mode(Mode::Timer, at(9, 0, 0));
        face.action();
        face.tick(at(9, 0, 1));
        face.tick(at(9, 0, 2));
        face.action();

        face.tick(at(9, 0, 3));
        face.tick(at(9, 0, 4));
        assert_eq!(face.timer().elapsed_seconds, 2);
        assert_eq!(face.surface().digits, ['0', '0', '0', '0', '0', '2']);
    }
}
