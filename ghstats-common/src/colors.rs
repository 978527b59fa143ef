//! Series color palette.

/// Base palette, in assignment order.
pub const COLORS: &[(&str, &str)] = &[
    ("aqua", "#7fdbff"),
    ("blue", "#0074d9"),
    ("lime", "#01ff70"),
    ("navy", "#001f3f"),
    ("teal", "#39cccc"),
    ("olive", "#3d9970"),
    ("green", "#2ecc40"),
    ("red", "#ff4136"),
    ("maroon", "#85144b"),
    ("orange", "#ff851b"),
    ("purple", "#b10dc9"),
    ("yellow", "#ffdc00"),
    ("fuchsia", "#f012be"),
    ("gray", "#aaaaaa"),
    ("white", "#ffffff"),
    ("black", "#111111"),
    ("silver", "#dddddd"),
];

/// Loops after which saturation shifts switch from decreasing to increasing.
const DECREASE_LOOPS: u32 = 10;

/// Infinite iterator of `#rrggbb` colors.
///
/// The first pass yields [`COLORS`] unchanged. Each later pass shifts the
/// saturation of every color so repeated series remain distinguishable.
#[derive(Debug, Clone)]
pub struct ColorCycle {
    colors: Vec<[f32; 3]>,
    index: usize,
    loops: u32,
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCycle {
    pub fn new() -> Self {
        let colors = COLORS
            .iter()
            .filter_map(|(_, hex)| hex_to_rgb(hex))
            .map(rgb_to_hsv)
            .collect();
        Self {
            colors,
            index: 0,
            loops: 0,
        }
    }

    fn regenerate(&mut self) {
        self.loops += 1;
        let factor = self.loops as f32 * 0.1;
        let increase = self.loops > DECREASE_LOOPS;

        for hsv in &mut self.colors {
            let mut s = hsv[1];
            if increase {
                s += factor;
                if s > 1.0 {
                    s = 0.0;
                }
            } else {
                s -= factor;
                if s < 0.0 {
                    s = 1.0;
                }
            }
            hsv[1] = s;
        }
    }
}

impl Iterator for ColorCycle {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.colors.is_empty() {
            return None;
        }
        if self.index >= self.colors.len() {
            self.index = 0;
            self.regenerate();
        }
        let hex = match COLORS.get(self.index) {
            Some((_, base)) if self.loops == 0 => base.to_string(),
            _ => rgb_to_hex(hsv_to_rgb(self.colors[self.index])),
        };
        self.index += 1;
        Some(hex)
    }
}

/// Parse `#rrggbb` into normalized RGB.
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(hex.get(i * 2..i * 2 + 2)?, 16).ok()?;
        *channel = byte as f32 / 255.0;
    }
    Some(rgb)
}

/// Format normalized RGB as `#rrggbb`.
pub fn rgb_to_hex(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn rgb_to_hsv([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return [0.0, 0.0, v];
    }
    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    [(h / 6.0).rem_euclid(1.0), s, v]
}

fn hsv_to_rgb([h, s, v]: [f32; 3]) -> [f32; 3] {
    if s == 0.0 {
        return [v, v, v];
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i32).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pass_is_base_palette() {
        let first: Vec<String> = ColorCycle::new().take(COLORS.len()).collect();
        let expected: Vec<String> = COLORS.iter().map(|(_, hex)| hex.to_string()).collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_second_pass_differs() {
        let mut cycle = ColorCycle::new();
        let first: Vec<String> = cycle.by_ref().take(COLORS.len()).collect();
        let second: Vec<String> = cycle.take(COLORS.len()).collect();
        assert_eq!(second.len(), COLORS.len());
        assert_ne!(first[0], second[0]);
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(hex_to_rgb("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(rgb_to_hex([1.0, 0.0, 0.0]), "#ff0000");
        assert_eq!(rgb_to_hex(hsv_to_rgb(rgb_to_hsv([0.0, 0.2, 1.0]))), "#0033ff");
    }
}
