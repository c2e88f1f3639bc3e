use std::collections::HashMap;

use rand::Rng;
use rand::rngs::SmallRng;
use ratatui::style::Color;

use crate::model::item::Pool;

/// Color assignments for the TUI. Tag colors are picked per session by
/// walking the hue wheel from a random offset, so related runs look fresh
/// but every tag keeps one color for the whole session.
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
    pub error: Color,
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Reset,
            dim: Color::DarkGray,
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            error: Color::Rgb(0xFF, 0x44, 0x44),
            tag_colors: HashMap::new(),
        }
    }
}

impl Theme {
    /// Build a theme with a hue assigned to every tag name in the pool.
    /// The rng is injected so sessions (and tests) can pick their seed.
    pub fn with_tag_colors(pool: &Pool, rng: &mut SmallRng) -> Self {
        let mut theme = Theme::default();

        let mut names: Vec<String> = Vec::new();
        for item in pool.iter() {
            for tag in item.tags() {
                if !names.contains(&tag.name) {
                    names.push(tag.name);
                }
            }
        }
        if names.is_empty() {
            return theme;
        }

        let interval = 360.0 / names.len() as f64;
        let offset: f64 = rng.r#gen::<f64>() * 360.0;
        for (i, name) in names.into_iter().enumerate() {
            let hue = (offset + i as f64 * interval) % 360.0;
            theme.tag_colors.insert(name, hsl_to_rgb(hue, 0.65, 0.62));
        }
        theme
    }

    pub fn tag_color(&self, name: &str) -> Color {
        self.tag_colors.get(name).copied().unwrap_or(self.dim)
    }
}

/// Convert an HSL color (hue in degrees) into a terminal RGB color.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(to_byte(r1), to_byte(g1), to_byte(b1))
}
