use crate::face::model::Mode;
use crate::surface::DisplaySurface;

// Retained copy of the face state; the engine writes it through the
// DisplaySurface trait and the draw pass reads it each frame.
#[derive(Clone, Debug)]
pub struct ScreenModel {
    pub digits: [char; 6],
    pub needle_percent: f32,
    pub blink: bool,
    pub active_mode: Mode,
    pub status_led: bool,
    pub timer_icon: bool,
    pub alarm_icon: bool,
    pub alarm_icon_blinking: bool,
    pub info_label: String,
    pub input_visible: bool,
    error_flash: bool,
}

impl ScreenModel {
    pub fn new() -> Self {
        Self {
            digits: ['0'; 6],
            needle_percent: 0.0,
            blink: false,
            active_mode: Mode::Clock,
            status_led: false,
            timer_icon: false,
            alarm_icon: false,
            alarm_icon_blinking: false,
            info_label: String::new(),
            input_visible: false,
            error_flash: false,
        }
    }

    pub fn take_error_flash(&mut self) -> bool {
        std::mem::take(&mut self.error_flash)
    }
}

impl Default for ScreenModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ScreenModel {
    fn set_digits(&mut self, digits: [char; 6]) {
        self.digits = digits;
    }

    fn set_needle_percent(&mut self, percent: f32) {
        self.needle_percent = percent;
    }

    fn set_blink(&mut self, on: bool) {
        self.blink = on;
    }

    fn set_active_mode(&mut self, mode: Mode) {
        self.active_mode = mode;
    }

    fn set_status_led(&mut self, on: bool) {
        self.status_led = on;
    }

    fn set_timer_icon(&mut self, visible: bool) {
        self.timer_icon = visible;
    }

    fn set_alarm_icon(&mut self, visible: bool, blinking: bool) {
        self.alarm_icon = visible;
        self.alarm_icon_blinking = blinking;
    }

    fn set_info_label(&mut self, text: &str) {
        self.info_label = text.to_string();
    }

    fn show_alarm_input(&mut self) {
        self.input_visible = true;
    }

    fn hide_alarm_input(&mut self) {
        self.input_visible = false;
    }

    fn flash_input_error(&mut self) {
        self.error_flash = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_flash_is_consumed_on_read() {
        let mut screen = ScreenModel::new();
        assert!(!screen.take_error_flash());
        screen.flash_input_error();
        assert!(screen.take_error_flash());
        assert!(!screen.take_error_flash());
    }

    #[test]
    fn surface_writes_land_in_the_model() {
        let mut screen = ScreenModel::new();
        screen.set_digits(['1', '2', '3', '4', '5', '6']);
        screen.set_needle_percent(50.0);
        screen.set_alarm_icon(true, true);
        screen.show_alarm_input();

        assert_eq!(screen.digits, ['1', '2', '3', '4', '5', '6']);
        assert_eq!(screen.needle_percent, 50.0);
        assert!(screen.alarm_icon && screen.alarm_icon_blinking);
        assert!(screen.input_visible);
    }
}
