//! Parsers for the transform literals embedded in manifest records.
//!
//! The authoring tool writes its math types using their `repr`, so a manifest carries strings like
//! `<Vector (1.0000, -2.5000, 0.0000)>` and `<Euler (x=0.0000, y=-0.0000, z=1.5708), order='XYZ'>`.
//! Both grammars are matched against the whole (trimmed) string.

use glam::Vec3;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LiteralError;
use crate::manifest::ComponentKind;

static VECTOR_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<Vector \(([^,]+), ([^,]+), ([^,]+)\)>$").expect("vector literal pattern")
});

static EULER_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<Euler \(x=([^,]+), y=([^,]+), z=([^,]+)\), order='([^']*)'>$")
        .expect("euler literal pattern")
});

/// The only rotation order the coordinate conversion understands.
pub const SUPPORTED_ROTATION_ORDER: &str = "XYZ";

/// Parses a `<Vector (x, y, z)>` literal. `kind` is only used for error reporting.
pub fn parse_vector(text: &str, kind: ComponentKind) -> Result<Vec3, LiteralError> {
    let captures = VECTOR_LITERAL
        .captures(text.trim())
        .ok_or_else(|| LiteralError::Malformed {
            kind,
            text: text.to_string(),
        })?;

    Ok(Vec3::new(
        parse_number(&captures[1])?,
        parse_number(&captures[2])?,
        parse_number(&captures[3])?,
    ))
}

/// Parses an `<Euler (x=.., y=.., z=..), order='XYZ'>` literal into radians.
///
/// Any order other than XYZ is rejected, even if the numbers themselves are fine.
pub fn parse_euler(text: &str) -> Result<Vec3, LiteralError> {
    let captures = EULER_LITERAL
        .captures(text.trim())
        .ok_or_else(|| LiteralError::Malformed {
            kind: ComponentKind::Rotation,
            text: text.to_string(),
        })?;

    let order = &captures[4];
    if order != SUPPORTED_ROTATION_ORDER {
        return Err(LiteralError::UnsupportedRotationOrder {
            order: order.to_string(),
        });
    }

    Ok(Vec3::new(
        parse_number(&captures[1])?,
        parse_number(&captures[2])?,
        parse_number(&captures[3])?,
    ))
}

fn parse_number(text: &str) -> Result<f32, LiteralError> {
    let invalid = || LiteralError::InvalidNumber {
        text: text.to_string(),
    };

    let value: f32 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(value)
}
