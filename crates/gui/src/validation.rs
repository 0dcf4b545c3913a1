//! Input boundary for typed property values.
//!
//! Text from the properties panel (or the command protocol) is turned into a
//! `FieldUpdate` here. Anything unparseable or non-finite is rejected, so the
//! scene store only ever sees well-formed values.

use serde::{Deserialize, Serialize};
use shared::{evaluate_numeric, Axis, Color};

use crate::error::InputError;
use crate::state::scene::FieldUpdate;

/// Editable field of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", content = "axis", rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Color,
    Position(Axis),
    /// Entered in degrees, stored in radians
    Rotation(Axis),
    Scale(Axis),
}

/// Parse a numeric field value (plain number or arithmetic expression)
pub fn parse_number(text: &str) -> Result<f64, InputError> {
    Ok(evaluate_numeric(text)?)
}

/// Parse a `#rrggbb` color
pub fn parse_color(text: &str) -> Result<Color, InputError> {
    Ok(Color::parse_hex(text)?)
}

/// Names are trimmed and must not be empty
pub fn parse_name(text: &str) -> Result<String, InputError> {
    let name = text.trim();
    if name.is_empty() {
        Err(InputError::EmptyName)
    } else {
        Ok(name.to_string())
    }
}

/// Turn raw text for `kind` into an update
pub fn parse_field(kind: FieldKind, text: &str) -> Result<FieldUpdate, InputError> {
    Ok(match kind {
        FieldKind::Name => FieldUpdate::Name(parse_name(text)?),
        FieldKind::Color => FieldUpdate::Color(parse_color(text)?),
        FieldKind::Position(axis) => FieldUpdate::Position(axis, parse_number(text)?),
        FieldKind::Rotation(axis) => FieldUpdate::Rotation(axis, parse_number(text)?.to_radians()),
        FieldKind::Scale(axis) => FieldUpdate::Scale(axis, parse_number(text)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NumericError;

    #[test]
    fn test_numeric_fields() {
        assert_eq!(
            parse_field(FieldKind::Position(Axis::X), "1.5 + 2").unwrap(),
            FieldUpdate::Position(Axis::X, 3.5)
        );
        match parse_field(FieldKind::Rotation(Axis::Y), "90").unwrap() {
            FieldUpdate::Rotation(Axis::Y, r) => assert!((r - std::f64::consts::FRAC_PI_2).abs() < 1e-12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_and_garbage() {
        assert_eq!(
            parse_field(FieldKind::Scale(Axis::Z), "inf"),
            Err(InputError::Numeric(NumericError::NonFinite))
        );
        assert!(parse_field(FieldKind::Position(Axis::X), "abc").is_err());
    }

    #[test]
    fn test_name_and_color() {
        assert_eq!(parse_field(FieldKind::Name, "  Tower "), Ok(FieldUpdate::Name("Tower".into())));
        assert_eq!(parse_field(FieldKind::Name, "   "), Err(InputError::EmptyName));
        assert!(matches!(parse_field(FieldKind::Color, "#zzzzzz"), Err(InputError::Color(_))));
    }

    #[test]
    fn test_field_kind_json_shape() {
        let json = serde_json::to_string(&FieldKind::Position(Axis::Y)).unwrap();
        assert_eq!(json, r#"{"field":"position","axis":"y"}"#);
        let name: FieldKind = serde_json::from_str(r#"{"field":"name"}"#).unwrap();
        assert_eq!(name, FieldKind::Name);
    }
}
