use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{LayoutError, Result};

use super::formula::calc;

/// Function of the parent's size.
pub type DynamicFn = Rc<dyn Fn(i64) -> i64>;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// A unit that always resolves to a concrete number of cells.
///
/// Used for offsets, alignments and gaps, where `auto` has no meaning.
#[derive(Clone)]
pub enum Length {
    Cells(i64),
    Percent(f64),
    Dynamic(DynamicFn),
}

impl Length {
    pub const START: Length = Length::Percent(0.0);
    pub const CENTER: Length = Length::Percent(50.0);
    pub const END: Length = Length::Percent(100.0);

    pub fn dynamic(f: impl Fn(i64) -> i64 + 'static) -> Self {
        Self::Dynamic(Rc::new(f))
    }

    /// Alignment keyword: `left`/`top`, `center`/`middle`, `right`/`bottom`.
    pub fn keyword(keyword: &str) -> Result<Self> {
        match keyword {
            "left" | "top" => Ok(Self::START),
            "center" | "middle" => Ok(Self::CENTER),
            "right" | "bottom" => Ok(Self::END),
            other => Err(LayoutError::InvalidUnit(other.to_string())),
        }
    }

    /// Resolve against `parent`.
    ///
    /// With `used` given, a percentage that would no longer fit next to the
    /// space already consumed rounds down instead of to nearest.
    pub fn resolve(&self, parent: i64, used: Option<i64>) -> i64 {
        match self {
            Length::Cells(cells) => *cells,
            Length::Dynamic(f) => f(parent),
            Length::Percent(percent) => {
                let exact = percent / 100.0 * parent as f64;
                let rounded = round_half_up(exact);
                match used {
                    Some(used) if used + rounded > parent => exact.floor() as i64,
                    _ => rounded,
                }
            }
        }
    }

    /// Whether the resolved value depends on the parent's size.
    pub fn is_relative(&self) -> bool {
        !matches!(self, Length::Cells(_))
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Cells(0)
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Cells(cells) => write!(f, "Cells({cells})"),
            Length::Percent(percent) => write!(f, "Percent({percent})"),
            Length::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Length::Cells(a), Length::Cells(b)) => a == b,
            (Length::Percent(a), Length::Percent(b)) => a == b,
            (Length::Dynamic(a), Length::Dynamic(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Length {
    fn from(cells: i64) -> Self {
        Length::Cells(cells)
    }
}

impl FromStr for Length {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text == "auto" {
            return Err(LayoutError::InvalidUnit(
                "`auto` is not allowed here".to_string(),
            ));
        }
        if text.starts_with("calc(") {
            return calc(text);
        }
        if let Some(percent) = text.strip_suffix('%') {
            return percent
                .trim()
                .parse::<f64>()
                .map(Length::Percent)
                .map_err(|_| LayoutError::InvalidUnit(text.to_string()));
        }
        if let Ok(cells) = text.parse::<i64>() {
            return Ok(Length::Cells(cells));
        }
        Length::keyword(text)
    }
}

/// Size specification of a node.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Unit {
    /// Derived from content or children.
    #[default]
    Auto,
    Length(Length),
}

impl Unit {
    pub fn cells(cells: i64) -> Self {
        Unit::Length(Length::Cells(cells))
    }

    pub fn percent(percent: f64) -> Self {
        Unit::Length(Length::Percent(percent))
    }

    pub fn dynamic(f: impl Fn(i64) -> i64 + 'static) -> Self {
        Unit::Length(Length::dynamic(f))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Unit::Auto)
    }

    pub fn as_length(&self) -> Option<&Length> {
        match self {
            Unit::Auto => None,
            Unit::Length(length) => Some(length),
        }
    }

    /// `None` for `Auto`; callers decide how to size those.
    pub fn resolve(&self, parent: i64, used: Option<i64>) -> Option<i64> {
        self.as_length().map(|length| length.resolve(parent, used))
    }
}

impl From<Length> for Unit {
    fn from(length: Length) -> Self {
        Unit::Length(length)
    }
}

impl From<i64> for Unit {
    fn from(cells: i64) -> Self {
        Unit::cells(cells)
    }
}

impl FromStr for Unit {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        if text.trim() == "auto" {
            return Ok(Unit::Auto);
        }
        text.parse::<Length>().map(Unit::Length)
    }
}
