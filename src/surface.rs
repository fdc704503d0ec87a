use crate::face::model::Mode;

// Capability object for the rendering host. Every method is total; a host
// missing an optional visual simply ignores the call.
pub trait DisplaySurface {
    fn set_digits(&mut self, digits: [char; 6]);
    fn set_needle_percent(&mut self, percent: f32);
    fn set_blink(&mut self, on: bool);
    fn set_active_mode(&mut self, mode: Mode);
    fn set_status_led(&mut self, on: bool);
    fn set_timer_icon(&mut self, visible: bool);
    fn set_alarm_icon(&mut self, visible: bool, blinking: bool);
    fn set_info_label(&mut self, text: &str);
    fn show_alarm_input(&mut self);
    fn hide_alarm_input(&mut self);
    fn flash_input_error(&mut self);
}

pub struct SilentSurface;

impl DisplaySurface for SilentSurface {
    fn set_digits(&mut self, _digits: [char; 6]) {}
    fn set_needle_percent(&mut self, _percent: f32) {}
    fn set_blink(&mut self, _on: bool) {}
    fn set_active_mode(&mut self, _mode: Mode) {}
    fn set_status_led(&mut self, _on: bool) {}
    fn set_timer_icon(&mut self, _visible: bool) {}
    fn set_alarm_icon(&mut self, _visible: bool, _blinking: bool) {}
    fn set_info_label(&mut self, _text: &str) {}
    fn show_alarm_input(&mut self) {}
    fn hide_alarm_input(&mut self) {}
    fn flash_input_error(&mut self) {}
}

#[cfg(test)]
pub(crate) struct RecordingSurface {
    pub digits: [char; 6],
    pub needle_percent: f32,
    pub blink: bool,
    pub active_mode: Option<Mode>,
    pub status_led: bool,
    pub timer_icon: bool,
    pub alarm_icon: bool,
    pub alarm_icon_blinking: bool,
    pub info_label: String,
    pub input_visible: bool,
    pub error_flashes: u32,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            digits: [' '; 6],
            needle_percent: 0.0,
            blink: false,
            active_mode: None,
            status_led: false,
            timer_icon: false,
            alarm_icon: false,
            alarm_icon_blinking: false,
            info_label: String::new(),
            input_visible: false,
            error_flashes: 0,
        }
    }
}

#[cfg(test)]
impl DisplaySurface for RecordingSurface {
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
        self.active_mode = Some(mode);
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
        self.error_flashes += 1;
    }
}
