//! Color literal parsing
//!
//! Accepted forms:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)`; channels above 1.0 are read as
//!   0-255 values, alpha is always 0-1
//! - A small set of named colors (case-insensitive)

use flipdef_core::Color;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map_opt, verify},
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded},
    IResult,
};

/// Parse a complete color literal, or `None` if `input` is not one
pub fn parse_color(input: &str) -> Option<Color> {
    let input = input.trim();

    if let Ok((_, color)) = all_consuming(alt((hex_color, rgba_color, rgb_color)))(input) {
        return Some(color);
    }

    named_color(input)
}

fn hex_value(digits: &str) -> u32 {
    digits
        .chars()
        .fold(0, |acc, c| (acc << 4) | c.to_digit(16).unwrap_or(0))
}

/// Parse hex color: #RGB, #RGBA, #RRGGBB or #RRGGBBAA
fn hex_color(input: &str) -> IResult<&str, Color> {
    map_opt(
        preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit())),
        |hex: &str| {
            let v = hex_value(hex);
            // Short forms repeat each nibble: 0xF -> 0xFF.
            let nib = |shift: u32| (((v >> shift) & 0xF) * 0x11) as u8;
            match hex.len() {
                3 => Some(Color::from_rgba8(nib(8), nib(4), nib(0), 0xFF)),
                4 => Some(Color::from_rgba8(nib(12), nib(8), nib(4), nib(0))),
                6 => Some(Color::from_hex((v << 8) | 0xFF)),
                8 => Some(Color::from_hex(v)),
                _ => None,
            }
        },
    )(input)
}

/// `( n, n, ... )` with finite numbers only; `float` also accepts `nan` and `inf`
fn channel_list(input: &str) -> IResult<&str, Vec<f32>> {
    delimited(
        preceded(multispace0, char('(')),
        verify(
            separated_list1(
                delimited(multispace0, char(','), multispace0),
                preceded(multispace0, float),
            ),
            |c: &Vec<f32>| c.iter().all(|v| v.is_finite()),
        ),
        preceded(multispace0, char(')')),
    )(input)
}

/// Normalize if values are 0-255 range
fn normalize(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    if r > 1.0 || g > 1.0 || b > 1.0 {
        (r / 255.0, g / 255.0, b / 255.0)
    } else {
        (r, g, b)
    }
}

/// Parse rgba(r, g, b, a)
fn rgba_color(input: &str) -> IResult<&str, Color> {
    map_opt(preceded(tag_no_case("rgba"), channel_list), |c: Vec<f32>| match c[..] {
        [r, g, b, a] => {
            let (r, g, b) = normalize(r, g, b);
            Some(Color::rgba(r, g, b, a.clamp(0.0, 1.0)))
        }
        _ => None,
    })(input)
}

/// Parse rgb(r, g, b)
fn rgb_color(input: &str) -> IResult<&str, Color> {
    map_opt(preceded(tag_no_case("rgb"), channel_list), |c: Vec<f32>| match c[..] {
        [r, g, b] => {
            let (r, g, b) = normalize(r, g, b);
            Some(Color::rgb(r, g, b))
        }
        _ => None,
    })(input)
}

/// Parse named colors
fn named_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::RED),
        "green" => Some(Color::rgb(0.0, 0.5, 0.0)),
        "blue" => Some(Color::BLUE),
        "yellow" => Some(Color::YELLOW),
        "cyan" | "aqua" => Some(Color::CYAN),
        "magenta" | "fuchsia" => Some(Color::MAGENTA),
        "gray" | "grey" => Some(Color::GRAY),
        "orange" => Some(Color::ORANGE),
        "purple" => Some(Color::PURPLE),
        "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> Option<String> {
        parse_color(s).map(|c| c.to_string())
    }

    #[test]
    fn hex_forms() {
        assert_eq!(hex("#FF0000FF"), Some("#FF0000FF".into()));
        assert_eq!(hex("#0000ff"), Some("#0000FFFF".into()));
        assert_eq!(hex("#abc"), Some("#AABBCCFF".into()));
        assert_eq!(hex("#abc8"), Some("#AABBCC88".into()));
        assert_eq!(hex("  #112233  "), Some("#112233FF".into()));
    }

    #[test]
    fn hex_rejects_bad_lengths_and_trailing_text() {
        assert_eq!(hex("#12345"), None);
        assert_eq!(hex("#1234567890"), None);
        assert_eq!(hex("#GGG"), None);
        assert_eq!(hex("#FFF garbage"), None);
        assert_eq!(hex("#"), None);
    }

    #[test]
    fn functional_forms() {
        assert_eq!(hex("rgb(255, 0, 0)"), Some("#FF0000FF".into()));
        assert_eq!(hex("RGB(0,0,1)"), Some("#0000FFFF".into()));
        assert_eq!(hex("rgba(0, 255, 0, 0.0)"), Some("#00FF0000".into()));
        assert_eq!(hex("rgb(1, 2)"), None);
        assert_eq!(hex("rgba(1, 2, 3)"), None);
    }

    #[test]
    fn functional_forms_reject_non_finite_channels() {
        assert_eq!(parse_color("rgb(nan, 0, 0)"), None);
        assert_eq!(parse_color("rgba(1, 1, 1, nan)"), None);
        assert_eq!(parse_color("rgb(inf, 0, 0)"), None);
        assert_eq!(parse_color("rgba(0, 0, -infinity, 1)"), None);
    }

    #[test]
    fn named_colors() {
        assert_eq!(parse_color("White"), Some(Color::WHITE));
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(parse_color("Surface0"), None);
    }

    #[test]
    fn exact_bits_for_eight_digit_hex() {
        assert_eq!(parse_color("#FF0000FF"), Some(Color::from_hex(0xFF0000FF)));
        assert_eq!(parse_color("#FF0000FF"), Some(Color::RED));
    }
}
