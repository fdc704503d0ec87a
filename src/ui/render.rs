use eframe::egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Ui, Vec2};

use crate::ui::app::Theme;
use crate::ui::screen::ScreenModel;

pub struct FacePalette {
    pub face: Color32,
    pub segment_lit: Color32,
    pub segment_dim: Color32,
    pub led_on: Color32,
    pub led_off: Color32,
    pub needle: Color32,
    pub track: Color32,
    pub text: Color32,
    pub icon: Color32,
    pub alert: Color32,
}

const DARK_PALETTE: FacePalette = FacePalette {
    face: Color32::from_rgb(10, 18, 30),
    segment_lit: Color32::from_rgb(255, 204, 96),
    segment_dim: Color32::from_rgb(26, 36, 50),
    led_on: Color32::from_rgb(104, 218, 131),
    led_off: Color32::from_rgb(34, 48, 64),
    needle: Color32::from_rgb(89, 204, 184),
    track: Color32::from_rgb(68, 98, 122),
    text: Color32::from_rgb(150, 171, 191),
    icon: Color32::from_rgb(114, 220, 205),
    alert: Color32::from_rgb(255, 106, 106),
};

const LIGHT_PALETTE: FacePalette = FacePalette {
    face: Color32::from_rgb(213, 219, 226),
    segment_lit: Color32::from_rgb(40, 46, 54),
    segment_dim: Color32::from_rgb(196, 203, 211),
    led_on: Color32::from_rgb(46, 160, 84),
    led_off: Color32::from_rgb(178, 186, 195),
    needle: Color32::from_rgb(26, 122, 142),
    track: Color32::from_rgb(142, 152, 164),
    text: Color32::from_rgb(70, 80, 92),
    icon: Color32::from_rgb(26, 122, 142),
    alert: Color32::from_rgb(196, 54, 54),
};

pub fn palette_for(theme: Theme) -> &'static FacePalette {
    match theme {
        Theme::Dark => &DARK_PALETTE,
        Theme::Light => &LIGHT_PALETTE,
    }
}

// Segment bits, LSB first: a (top), b (top right), c (bottom right),
// d (bottom), e (bottom left), f (top left), g (middle).
fn segment_mask(digit: char) -> u8 {
    match digit {
        '0' => 0x3F,
        '1' => 0x06,
        '2' => 0x5B,
        '3' => 0x4F,
        '4' => 0x66,
        '5' => 0x6D,
        '6' => 0x7D,
        '7' => 0x07,
        '8' => 0x7F,
        '9' => 0x6F,
        _ => 0x00,
    }
}

pub fn draw_face(ui: &mut Ui, screen: &ScreenModel, palette: &FacePalette, blink_phase_on: bool) {
    let desired = Vec2::new(ui.available_width().max(360.0), 200.0);
    let (rect, _response) = ui.allocate_exact_size(desired, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, CornerRadius::same(10), palette.face);

    draw_header(&painter, rect, screen, palette, blink_phase_on);

    let lit_visible = !(screen.blink && !blink_phase_on);
    draw_digit_row(&painter, rect, screen, palette, lit_visible);
    draw_needle_track(&painter, rect, screen.needle_percent, palette);
}

fn draw_header(
    painter: &Painter,
    rect: Rect,
    screen: &ScreenModel,
    palette: &FacePalette,
    blink_phase_on: bool,
) {
    let header_y = rect.min.y + 22.0;

    let led_color = if screen.status_led {
        palette.led_on
    } else {
        palette.led_off
    };
    painter.circle_filled(Pos2::new(rect.min.x + 24.0, header_y), 5.0, led_color);

    painter.text(
        Pos2::new(rect.center().x, header_y),
        Align2::CENTER_CENTER,
        &screen.info_label,
        FontId::monospace(13.0),
        palette.text,
    );

    let mut icon_x = rect.max.x - 24.0;
    if screen.alarm_icon {
        let color = if screen.alarm_icon_blinking && blink_phase_on {
            palette.alert
        } else {
            palette.icon
        };
        painter.text(
            Pos2::new(icon_x, header_y),
            Align2::RIGHT_CENTER,
            "ALM",
            FontId::monospace(12.0),
            color,
        );
        icon_x -= 40.0;
    }
    if screen.timer_icon {
        painter.text(
            Pos2::new(icon_x, header_y),
            Align2::RIGHT_CENTER,
            "TMR",
            FontId::monospace(12.0),
            palette.icon,
        );
    }
}

fn draw_digit_row(
    painter: &Painter,
    rect: Rect,
    screen: &ScreenModel,
    palette: &FacePalette,
    lit_visible: bool,
) {
    let margin = 26.0;
    let top = rect.min.y + 44.0;
    let height = 96.0;
    let width = rect.width() - 2.0 * margin;

    // Six digit cells plus two colon slots, with small gaps between cells.
    let gap = width * 0.015;
    let colon_w = width * 0.05;
    let digit_w = (width - 2.0 * colon_w - 7.0 * gap) / 6.0;

    let mut x = rect.min.x + margin;
    for (index, digit) in screen.digits.iter().enumerate() {
        let cell = Rect::from_min_size(Pos2::new(x, top), Vec2::new(digit_w, height));
        draw_digit(painter, cell, *digit, palette, lit_visible);
        x += digit_w + gap;
        if index == 1 || index == 3 {
            draw_colon(painter, Pos2::new(x + colon_w / 2.0, top), height, palette, lit_visible);
            x += colon_w + gap;
        }
    }
}

fn draw_digit(painter: &Painter, cell: Rect, digit: char, palette: &FacePalette, lit_visible: bool) {
    let mask = segment_mask(digit);
    let t = cell.width() * 0.18;
    for segment in 0..7 {
        let lit = mask & (1 << segment) != 0;
        let color = if lit && lit_visible {
            palette.segment_lit
        } else {
            palette.segment_dim
        };
        painter.rect_filled(segment_rect(cell, segment, t), CornerRadius::same(1), color);
    }
}

fn segment_rect(cell: Rect, segment: usize, t: f32) -> Rect {
    let w = cell.width();
    let h = cell.height();
    let half = (h - 3.0 * t) / 2.0;
    match segment {
        0 => Rect::from_min_size(
            Pos2::new(cell.min.x + t, cell.min.y),
            Vec2::new(w - 2.0 * t, t),
        ),
        1 => Rect::from_min_size(
            Pos2::new(cell.max.x - t, cell.min.y + t),
            Vec2::new(t, half),
        ),
        2 => Rect::from_min_size(
            Pos2::new(cell.max.x - t, cell.min.y + 2.0 * t + half),
            Vec2::new(t, half),
        ),
        3 => Rect::from_min_size(
            Pos2::new(cell.min.x + t, cell.max.y - t),
            Vec2::new(w - 2.0 * t, t),
        ),
        4 => Rect::from_min_size(
            Pos2::new(cell.min.x, cell.min.y + 2.0 * t + half),
            Vec2::new(t, half),
        ),
        5 => Rect::from_min_size(Pos2::new(cell.min.x, cell.min.y + t), Vec2::new(t, half)),
        _ => Rect::from_min_size(
            Pos2::new(cell.min.x + t, cell.min.y + t + half),
            Vec2::new(w - 2.0 * t, t),
        ),
    }
}

fn draw_colon(
    painter: &Painter,
    center_top: Pos2,
    height: f32,
    palette: &FacePalette,
    lit_visible: bool,
) {
    let color = if lit_visible {
        palette.segment_lit
    } else {
        palette.segment_dim
    };
    let radius = 3.0;
    painter.circle_filled(Pos2::new(center_top.x, center_top.y + height * 0.33), radius, color);
    painter.circle_filled(Pos2::new(center_top.x, center_top.y + height * 0.67), radius, color);
}

fn draw_needle_track(painter: &Painter, rect: Rect, percent: f32, palette: &FacePalette) {
    let y = rect.max.y - 26.0;
    let left = rect.min.x + 26.0;
    let right = rect.max.x - 26.0;
    painter.line_segment(
        [Pos2::new(left, y), Pos2::new(right, y)],
        (1.5, palette.track),
    );
    for tick in 0..=12 {
        let x = left + (right - left) * tick as f32 / 12.0;
        painter.line_segment(
            [Pos2::new(x, y - 3.0), Pos2::new(x, y + 3.0)],
            (1.0, palette.track),
        );
    }

    let clamped = percent.clamp(0.0, 100.0);
    let marker_x = left + (right - left) * clamped / 100.0;
    painter.circle_filled(Pos2::new(marker_x, y), 5.0, palette.needle);
}
