//! Low-level nom parser functions for style attribute text.
//!
//! Every typed style key is backed by one of the `parse_*` functions in this
//! module. They are invoked lazily, the first time an attribute is read.

use crate::dimension::{Dimension, PageSize};
use crate::font::{FontStyle, FontWeight};
use crate::paint::{BorderStyle, DashPattern, FillRule, LineCap, LineJoin, PatternRepeat};
use crate::text::TextAlign;
use folio_types::{ColorSpace, ColorValue, Point, Size, Thickness};
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while_m_n};
use nom::character::complete::{char, multispace0, space0};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Float parse error: {0}")]
    FloatParse(String),
}

type PResult<'a, T> = IResult<&'a str, T>;

// --- Helper Parsers ---

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(space0, inner, space0)
}

fn digits(input: &str) -> PResult<'_, &str> {
    take_while_m_n(1, 10, |c: char| c.is_ascii_digit()).parse(input)
}

fn parse_f32(input: &str) -> PResult<'_, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digits, opt(pair(char('.'), digits)))),
                recognize(pair(char('.'), digits)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

/// Comma with optional surrounding whitespace, as used inside color functions.
fn comma(input: &str) -> PResult<'_, char> {
    delimited(multispace0, char(','), multispace0).parse(input)
}

// --- Unit & Dimension Parsers ---

fn parse_unit(input: &str) -> PResult<'_, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0),
        map(tag_no_case("px"), |_| 1.0), // Treat px as pt
        map(tag_no_case("in"), |_| 72.0),
        map(tag_no_case("cm"), |_| 28.35),
        map(tag_no_case("mm"), |_| 2.835),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm").
pub fn parse_length(input: &str) -> PResult<'_, f32> {
    let (input, value) = parse_f32(input)?;
    let (input, unit_multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}

/// Parses a dimension value (length, percentage, or "auto").
pub fn parse_dimension(input: &str) -> PResult<'_, Dimension> {
    alt((
        map(tag_no_case("auto"), |_| Dimension::Auto),
        map(terminated(parse_f32, char('%')), Dimension::Percent),
        map(parse_length, Dimension::Pt),
    ))
    .parse(input)
}

/// Parses 1, 2 or 4 whitespace separated lengths into per-edge values.
pub fn parse_thickness(input: &str) -> PResult<'_, Thickness> {
    map_res(
        separated_list1(nom::character::complete::space1, parse_length),
        |parts: Vec<f32>| match parts.as_slice() {
            [all] => Ok(Thickness::all(*all)),
            [v, h] => Ok(Thickness::new(*v, *h, *v, *h)),
            [t, r, b, l] => Ok(Thickness::new(*t, *r, *b, *l)),
            _ => Err(StyleParseError::Parse(format!(
                "expected 1, 2, or 4 values, got {}",
                parts.len()
            ))),
        },
    )
    .parse(input)
}

/// Parses one or two lengths; a single length applies to both axes.
pub fn parse_length_pair(input: &str) -> PResult<'_, (f32, f32)> {
    map_res(
        separated_list1(alt((comma, map(nom::character::complete::space1, |_| ' '))), parse_length),
        |parts: Vec<f32>| match parts.as_slice() {
            [v] => Ok((*v, *v)),
            [x, y] => Ok((*x, *y)),
            _ => Err(StyleParseError::Parse(format!(
                "expected 1 or 2 values, got {}",
                parts.len()
            ))),
        },
    )
    .parse(input)
}

/// Parses a dash array, separated by whitespace or commas (e.g., "3 2" or "3,2").
pub fn parse_dash_pattern(input: &str) -> PResult<'_, DashPattern> {
    alt((
        map(tag_no_case("none"), |_| DashPattern::solid()),
        map(
            separated_list1(
                alt((comma, map(nom::character::complete::space1, |_| ' '))),
                parse_length,
            ),
            |segments: Vec<f32>| DashPattern::new(segments, 0.0),
        ),
    ))
    .parse(input)
}

// --- Color Parsers ---

fn from_hex(input: &str) -> Result<u8, std::num::ParseIntError> {
    u8::from_str_radix(input, 16)
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn hex_primary(input: &str) -> PResult<'_, u8> {
    map_res(take_while_m_n(2, 2, is_hex_digit), from_hex).parse(input)
}

fn hex_short(input: &str) -> PResult<'_, u8> {
    // A single hex digit `f` stands for `ff`.
    map_res(take_while_m_n(1, 1, is_hex_digit), |s: &str| {
        from_hex(s).map(|v| v * 17)
    })
    .parse(input)
}

fn hex_color_6(input: &str) -> PResult<'_, ColorValue> {
    map((hex_primary, hex_primary, hex_primary), |(r, g, b): (u8, u8, u8)| {
        ColorValue::from_rgb8(r, g, b)
    })
    .parse(input)
}

fn hex_color_3(input: &str) -> PResult<'_, ColorValue> {
    map((hex_short, hex_short, hex_short), |(r, g, b): (u8, u8, u8)| {
        ColorValue::from_rgb8(r, g, b)
    })
    .parse(input)
}

/// Parses a hex color (e.g., "#FF0000" or "#F00").
pub fn parse_hex_color(input: &str) -> PResult<'_, ColorValue> {
    preceded(char('#'), alt((hex_color_6, hex_color_3))).parse(input)
}

fn channel_8bit(input: &str) -> PResult<'_, f32> {
    map(parse_f32, |v: f32| (v / 255.0).clamp(0.0, 1.0)).parse(input)
}

fn function_args<'a>(
    name: &'static str,
    count: usize,
) -> impl Parser<&'a str, Output = Vec<f32>, Error = nom::error::Error<&'a str>> {
    map_res(
        delimited(
            (tag_no_case(name), multispace0, char('('), multispace0),
            separated_list1(comma, parse_f32),
            (multispace0, char(')')),
        ),
        move |args: Vec<f32>| {
            if args.len() == count {
                Ok(args)
            } else {
                Err(StyleParseError::Parse(format!(
                    "{name}() expects {count} argument(s)"
                )))
            }
        },
    )
}

/// Parses `rgb(r, g, b)` with 0..255 channels.
pub fn parse_rgb_function(input: &str) -> PResult<'_, ColorValue> {
    map(
        delimited(
            (tag_no_case("rgb"), multispace0, char('('), multispace0),
            (channel_8bit, preceded(comma, channel_8bit), preceded(comma, channel_8bit)),
            (multispace0, char(')')),
        ),
        |(r, g, b): (f32, f32, f32)| ColorValue::Rgb { r, g, b },
    )
    .parse(input)
}

/// Parses `gray(v)`. Values above 1 are read on the 0..255 scale.
pub fn parse_gray_function(input: &str) -> PResult<'_, ColorValue> {
    map(function_args("gray", 1), |args: Vec<f32>| {
        let v = args[0];
        ColorValue::gray(if v > 1.0 { v / 255.0 } else { v })
    })
    .parse(input)
}

/// Parses `hsl(h, s, l)` for storage. The result is not renderable.
pub fn parse_hsl_function(input: &str) -> PResult<'_, ColorValue> {
    map_res(function_args("hsl", 3), |args: Vec<f32>| {
        ColorValue::stored(ColorSpace::Hsl, &args)
    })
    .parse(input)
}

fn named_color(name: &str) -> Option<ColorValue> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "aqua" | "cyan" => (0, 255, 255),
        "fuchsia" | "magenta" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "navy" => (0, 0, 128),
        "olive" => (128, 128, 0),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(ColorValue::from_rgb8(r, g, b))
}

/// Parses any supported color text. `inherit`, `none` and `transparent`
/// produce `None`, meaning "no color set".
pub fn parse_color_value(s: &str) -> Result<Option<ColorValue>, StyleParseError> {
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "inherit" | "none" | "transparent" | "" => return Ok(None),
        _ => {}
    }
    if let Some(named) = named_color(&lower) {
        return Ok(Some(named));
    }
    run_parser(
        alt((
            parse_hex_color,
            parse_rgb_function,
            parse_gray_function,
            parse_hsl_function,
        )),
        trimmed,
    )
    .map(Some)
    .map_err(|_| StyleParseError::InvalidValue {
        property: "color".to_string(),
        value: s.to_string(),
    })
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- High-level Parse Functions ---
//
// These have the `fn(&str) -> Result<T, StyleParseError>` shape expected by
// `StyleKey`.

pub fn parse_length_value(s: &str) -> Result<f32, StyleParseError> {
    run_parser(parse_length, s)
}

pub fn parse_dimension_value(s: &str) -> Result<Dimension, StyleParseError> {
    run_parser(parse_dimension, s)
}

pub fn parse_thickness_value(s: &str) -> Result<Thickness, StyleParseError> {
    run_parser(parse_thickness, s)
}

pub fn parse_dash_value(s: &str) -> Result<DashPattern, StyleParseError> {
    run_parser(parse_dash_pattern, s)
}

pub fn parse_point_value(s: &str) -> Result<Point, StyleParseError> {
    run_parser(parse_length_pair, s).map(|(x, y)| Point::new(x, y))
}

pub fn parse_size_value(s: &str) -> Result<Size, StyleParseError> {
    run_parser(parse_length_pair, s).map(|(w, h)| Size::new(w, h))
}

/// Parses a number, or a percentage mapped onto `0..1`.
pub fn parse_unit_interval(s: &str) -> Result<f32, StyleParseError> {
    let value = run_parser(
        alt((
            map(terminated(parse_f32, ws(tag("%"))), |v: f32| v / 100.0),
            parse_f32,
        )),
        s,
    )?;
    Ok(value)
}

pub fn parse_number(s: &str) -> Result<f32, StyleParseError> {
    s.trim()
        .parse::<f32>()
        .map_err(|_| StyleParseError::FloatParse(format!("Invalid number: {}", s)))
}

pub fn parse_bool(s: &str) -> Result<bool, StyleParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(StyleParseError::InvalidValue {
            property: "boolean".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_text(s: &str) -> Result<String, StyleParseError> {
    Ok(s.trim().to_string())
}

/// Parses a font family, stripping surrounding quotes.
pub fn parse_font_family(s: &str) -> Result<String, StyleParseError> {
    let trimmed = s.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        return Err(StyleParseError::InvalidValue {
            property: "font-family".to_string(),
            value: s.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Parses a font weight string (e.g., "bold", "400").
pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "thin" => Ok(FontWeight::Thin),
        "light" => Ok(FontWeight::Light),
        "regular" | "normal" => Ok(FontWeight::Regular),
        "medium" => Ok(FontWeight::Medium),
        "bold" => Ok(FontWeight::Bold),
        "black" => Ok(FontWeight::Black),
        other => {
            let num_weight = other
                .parse::<u16>()
                .map_err(|_| StyleParseError::InvalidValue {
                    property: "font-weight".to_string(),
                    value: s.to_string(),
                })?;
            Ok(FontWeight::Numeric(num_weight))
        }
    }
}

/// Parses a font style string (e.g., "normal", "italic").
pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "normal" => Ok(FontStyle::Normal),
        "italic" => Ok(FontStyle::Italic),
        "oblique" => Ok(FontStyle::Oblique),
        _ => Err(StyleParseError::InvalidValue {
            property: "font-style".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parses a text-align value. `justify` is laid out as left aligned.
pub fn parse_text_align(s: &str) -> Result<TextAlign, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "left" | "justify" => Ok(TextAlign::Left),
        "right" => Ok(TextAlign::Right),
        "center" => Ok(TextAlign::Center),
        _ => Err(StyleParseError::InvalidValue {
            property: "text-align".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_line_cap(s: &str) -> Result<LineCap, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "butt" | "flat" => Ok(LineCap::Butt),
        "round" => Ok(LineCap::Round),
        "square" | "projecting" => Ok(LineCap::Square),
        _ => Err(StyleParseError::InvalidValue {
            property: "line-cap".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_line_join(s: &str) -> Result<LineJoin, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "miter" | "mitre" => Ok(LineJoin::Miter),
        "round" => Ok(LineJoin::Round),
        "bevel" => Ok(LineJoin::Bevel),
        _ => Err(StyleParseError::InvalidValue {
            property: "line-join".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_fill_rule(s: &str) -> Result<FillRule, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "nonzero" | "winding" => Ok(FillRule::NonZero),
        "evenodd" | "even-odd" => Ok(FillRule::EvenOdd),
        _ => Err(StyleParseError::InvalidValue {
            property: "fill-rule".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_border_style(s: &str) -> Result<BorderStyle, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "solid" => Ok(BorderStyle::Solid),
        "dashed" => Ok(BorderStyle::Dashed),
        "dotted" => Ok(BorderStyle::Dotted),
        "none" => Ok(BorderStyle::None),
        _ => Err(StyleParseError::InvalidValue {
            property: "border-style".to_string(),
            value: s.to_string(),
        }),
    }
}

pub fn parse_pattern_repeat(s: &str) -> Result<PatternRepeat, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "repeat" => Ok(PatternRepeat::Repeat),
        "repeat-x" => Ok(PatternRepeat::RepeatX),
        "repeat-y" => Ok(PatternRepeat::RepeatY),
        "no-repeat" | "none" => Ok(PatternRepeat::NoRepeat),
        _ => Err(StyleParseError::InvalidValue {
            property: "repeat".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parses a page size value.
pub fn parse_page_size(s: &str) -> Result<PageSize, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "a4" => Ok(PageSize::A4),
        "letter" => Ok(PageSize::Letter),
        "legal" => Ok(PageSize::Legal),
        _ => Err(StyleParseError::InvalidValue {
            property: "page-size".to_string(),
            value: s.to_string(),
        }),
    }
}
