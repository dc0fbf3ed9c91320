//! Sage-gradient ASCII banner (MENTRA).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Deep Sage (#33691e).
const DEEP_SAGE: (u8, u8, u8) = (0x33, 0x69, 0x1e);
/// Light Green (#8bc34a).
const LIGHT_GREEN: (u8, u8, u8) = (0x8b, 0xc3, 0x4a);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn banner_lines() -> Vec<String> {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("MENTRA").map(|figure| figure.to_string()))
        .map(|art| art.lines().map(str::to_string).collect())
        .unwrap_or_else(|| vec!["MENTRA SPHERE".to_string()])
}

/// Prints the welcome banner with a vertical gradient, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let lines = banner_lines();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(DEEP_SAGE, LIGHT_GREEN, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: LIGHT_GREEN.0,
        g: LIGHT_GREEN.1,
        b: LIGHT_GREEN.2,
    }));
    let _ = out.execute(Print(format!("Mentra Sphere v{}\r\n", version)));
    let _ = out.execute(Print("You are not alone.\r\n\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(DEEP_SAGE, LIGHT_GREEN, 0.0), DEEP_SAGE);
        assert_eq!(lerp_rgb(DEEP_SAGE, LIGHT_GREEN, 1.0), LIGHT_GREEN);
    }

    #[test]
    fn test_banner_has_lines() {
        assert!(!banner_lines().is_empty());
    }
}
