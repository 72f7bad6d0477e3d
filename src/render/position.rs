use std::{fmt, str::FromStr};

use crate::foundation::error::{StoryscapeError, StoryscapeResult};

/// `background-position` style anchor, as fractions of the free space on each axis.
///
/// `0.0` aligns the image's left/top edge with the canvas, `1.0` its right/bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPosition {
    pub x: f64,
    pub y: f64,
}

impl BackgroundPosition {
    pub const CENTER: BackgroundPosition = BackgroundPosition { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> StoryscapeResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(StoryscapeError::validation(
                "background position must be finite",
            ));
        }
        Ok(Self { x, y })
    }
}

impl Default for BackgroundPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Fraction(f64),
}

fn parse_token(s: &str) -> StoryscapeResult<Token> {
    Ok(match s.to_ascii_lowercase().as_str() {
        "left" => Token::Left,
        "right" => Token::Right,
        "top" => Token::Top,
        "bottom" => Token::Bottom,
        "center" | "centre" => Token::Center,
        other => {
            let pct = other.strip_suffix('%').ok_or_else(|| {
                StoryscapeError::validation(format!("unknown position keyword '{other}'"))
            })?;
            let v: f64 = pct.parse().map_err(|_| {
                StoryscapeError::validation(format!("invalid position percentage '{other}'"))
            })?;
            if !v.is_finite() {
                return Err(StoryscapeError::validation(format!(
                    "invalid position percentage '{other}'"
                )));
            }
            Token::Fraction(v / 100.0)
        }
    })
}

fn horizontal(t: Token) -> Option<f64> {
    match t {
        Token::Left => Some(0.0),
        Token::Center => Some(0.5),
        Token::Right => Some(1.0),
        Token::Fraction(v) => Some(v),
        Token::Top | Token::Bottom => None,
    }
}

fn vertical(t: Token) -> Option<f64> {
    match t {
        Token::Top => Some(0.0),
        Token::Center => Some(0.5),
        Token::Bottom => Some(1.0),
        Token::Fraction(v) => Some(v),
        Token::Left | Token::Right => None,
    }
}

impl FromStr for BackgroundPosition {
    type Err = StoryscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split_whitespace()
            .map(parse_token)
            .collect::<StoryscapeResult<Vec<_>>>()?;

        let (x, y) = match tokens.as_slice() {
            [] => return Ok(Self::CENTER),
            [Token::Top] => (Some(0.5), Some(0.0)),
            [Token::Bottom] => (Some(0.5), Some(1.0)),
            [single] => (horizontal(*single), Some(0.5)),
            [a, b] => {
                // Keywords may come vertical-first ("top left", "center right").
                let vertical_first = matches!(a, Token::Top | Token::Bottom)
                    || matches!(b, Token::Left | Token::Right);
                let keywords_only =
                    !matches!(a, Token::Fraction(_)) && !matches!(b, Token::Fraction(_));
                if vertical_first && keywords_only {
                    (horizontal(*b), vertical(*a))
                } else {
                    (horizontal(*a), vertical(*b))
                }
            }
            _ => {
                return Err(StoryscapeError::validation(format!(
                    "background position '{s}' has too many components"
                )));
            }
        };

        match (x, y) {
            (Some(x), Some(y)) => Self::new(x, y),
            _ => Err(StoryscapeError::validation(format!(
                "invalid background position '{s}'"
            ))),
        }
    }
}

impl fmt::Display for BackgroundPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.x * 100.0, self.y * 100.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/position.rs"]
mod tests;
