use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Timelike;
use eframe::egui::{self, Align, Align2, Color32, Key, Layout, RichText, TextEdit, TopBottomPanel};

use crate::face::engine::ClockFace;
use crate::face::model::Mode;
use crate::runner::TICK_INTERVAL;
use crate::time_provider::{LocalTimeProvider, TimeProvider};
use crate::ui::render::{self, palette_for};
use crate::ui::screen::ScreenModel;

const INPUT_ERROR_FLASH: Duration = Duration::from_millis(500);
const BLINK_REPAINT: Duration = Duration::from_millis(125);
const MAX_TICKS_PER_UPDATE: u32 = 60;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Theme {
    Dark,
    Light,
}

pub fn run_gui(mode: Mode, theme: Theme) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SegClock")
            .with_inner_size([560.0, 330.0])
            .with_min_inner_size([460.0, 300.0]),
        ..Default::default()
    };

    let app = SegClockApp::new(mode, theme);
    eframe::run_native(
        "SegClock",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx, theme);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch SegClock window: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => {
            let mut visuals = egui::Visuals::dark();
            visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
            visuals.panel_fill = Color32::from_rgb(8, 16, 26);
            visuals.window_fill = Color32::from_rgb(12, 20, 32);
            visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 18, 30);
            visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
            visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
            visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
            visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
            visuals
        }
        Theme::Light => {
            let mut visuals = egui::Visuals::light();
            visuals.override_text_color = Some(Color32::from_rgb(34, 42, 52));
            visuals.panel_fill = Color32::from_rgb(233, 236, 240);
            visuals.window_fill = Color32::from_rgb(244, 246, 249);
            visuals.selection.bg_fill = Color32::from_rgb(52, 140, 170);
            visuals
        }
    };
    ctx.set_visuals(visuals);
}

struct SegClockApp {
    face: ClockFace<ScreenModel>,
    provider: Box<dyn TimeProvider>,
    theme: Theme,
    next_tick: Instant,
    alarm_input: String,
    input_was_open: bool,
    focus_alarm_input: bool,
    input_error_until: Option<Instant>,
    status_message: Option<(String, Instant)>,
}

impl SegClockApp {
    fn new(mode: Mode, theme: Theme) -> Self {
        let provider: Box<dyn TimeProvider> = Box::new(LocalTimeProvider);
        let mut face = ClockFace::new(ScreenModel::new());
        face.startup(mode, provider.now());
        Self {
            face,
            provider,
            theme,
            next_tick: Instant::now() + TICK_INTERVAL,
            alarm_input: String::new(),
            input_was_open: false,
            focus_alarm_input: false,
            input_error_until: None,
            status_message: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status_message = Some((text.into(), Instant::now() + ttl));
    }

    fn advance_ticks(&mut self) {
        let mut steps = 0;
        let mut now = Instant::now();
        while now >= self.next_tick && steps < MAX_TICKS_PER_UPDATE {
            let was_ringing = self.face.alarm().ringing;
            self.face.tick(self.provider.now());
            if !was_ringing && self.face.alarm().ringing {
                self.set_status("Alarm finished. ACTION silences it.", Duration::from_secs(4));
            }
            self.next_tick += TICK_INTERVAL;
            steps += 1;
            now = Instant::now();
        }

        if now >= self.next_tick {
            // Woke from a long suspend; re-anchor instead of replaying the
            // whole backlog.
            self.next_tick = now + TICK_INTERVAL;
        }
    }
}

impl eframe::App for SegClockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        self.advance_ticks();

        let input_open = self.face.input_open();
        if input_open && !self.input_was_open {
            self.alarm_input.clear();
            self.input_error_until = None;
            self.focus_alarm_input = true;
        }
        self.input_was_open = input_open;

        let screen = self.face.surface().clone();
        let palette = palette_for(self.theme);
        let blink_phase_on = self.provider.now().nanosecond() / 250_000_000 % 2 == 0;

        let mut mode_intent: Option<Mode> = None;
        let mut action_clicked = false;
        let mut reset_clicked = false;
        let mut theme_toggled = false;
        let mut submit = false;
        let mut cancel = false;

        TopBottomPanel::top("mode_bar").resizable(false).show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("SegClock").size(18.0).strong());
                ui.separator();
                for (mode, label) in [
                    (Mode::Clock, "CLOCK"),
                    (Mode::Timer, "TIMER"),
                    (Mode::Alarm, "ALARM"),
                ] {
                    if ui.selectable_label(screen.active_mode == mode, label).clicked() {
                        mode_intent = Some(mode);
                    }
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let theme_label = match self.theme {
                        Theme::Dark => "Light theme",
                        Theme::Light => "Dark theme",
                    };
                    if ui.button(theme_label).clicked() {
                        theme_toggled = true;
                    }
                });
            });
        });

        let button_hint = match self.face.mode() {
            Mode::Clock => "clock mode: buttons are idle",
            Mode::Timer => {
                if self.face.timer().running {
                    "ACTION pauses, RESET zeroes"
                } else {
                    "ACTION starts, RESET zeroes"
                }
            }
            Mode::Alarm => {
                if self.face.alarm().ringing {
                    "ACTION silences the ring"
                } else if self.face.alarm().is_unset() {
                    "ACTION sets a countdown"
                } else if self.face.alarm().running {
                    "ACTION pauses the countdown"
                } else {
                    "ACTION starts the countdown"
                }
            }
        };

        TopBottomPanel::bottom("controls").resizable(false).show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(RichText::new("ACTION").strong()).clicked() {
                    action_clicked = true;
                }
                if ui.button(RichText::new("RESET").strong()).clicked() {
                    reset_clicked = true;
                }
                ui.separator();
                ui.weak(button_hint);
                if let Some((message, _)) = &self.status_message {
                    ui.separator();
                    ui.label(RichText::new(message).color(palette.led_on));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            render::draw_face(ui, &screen, palette, blink_phase_on);
        });

        if input_open {
            let error_active = self
                .input_error_until
                .is_some_and(|until| Instant::now() < until);
            egui::Window::new("Set alarm")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("Countdown minutes:");
                    let mut edit = TextEdit::singleline(&mut self.alarm_input).desired_width(120.0);
                    if error_active {
                        edit = edit.text_color(palette.alert);
                    }
                    let response = ui.add(edit);
                    if self.focus_alarm_input {
                        response.request_focus();
                        self.focus_alarm_input = false;
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        submit = true;
                    }
                    if error_active {
                        ui.colored_label(
                            palette.alert,
                            "Enter a whole number of minutes greater than zero.",
                        );
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Set").clicked() {
                            submit = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                    });
                    if ui.input(|i| i.key_pressed(Key::Escape)) {
                        cancel = true;
                    }
                });
        }

        if let Some(mode) = mode_intent {
            self.face.set_mode(mode, self.provider.now());
        }
        if action_clicked {
            self.face.action();
        }
        if reset_clicked {
            self.face.reset();
        }
        if theme_toggled {
            self.theme = match self.theme {
                Theme::Dark => Theme::Light,
                Theme::Light => Theme::Dark,
            };
            configure_theme(ctx, self.theme);
        }
        if submit {
            let text = self.alarm_input.clone();
            match self.face.submit_alarm_minutes(&text) {
                Ok(()) => {
                    self.alarm_input.clear();
                    self.input_error_until = None;
                    self.set_status("Alarm armed. ACTION starts the countdown.", Duration::from_secs(3));
                }
                Err(err) => self.set_status(err.to_string(), Duration::from_secs(2)),
            }
        } else if cancel {
            self.face.cancel_alarm_input();
            self.alarm_input.clear();
            self.input_error_until = None;
        }

        if self.face.surface_mut().take_error_flash() {
            self.input_error_until = Some(Instant::now() + INPUT_ERROR_FLASH);
        }

        let mut wait = self.next_tick.saturating_duration_since(Instant::now());
        if screen.blink || self.input_error_until.is_some() {
            wait = wait.min(BLINK_REPAINT);
        }
        ctx.request_repaint_after(wait);
    }
}
