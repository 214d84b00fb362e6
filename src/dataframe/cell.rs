//! Default cell type stored in a [`Dataframe`](crate::dataframe::Dataframe).
//!
//! The table never looks inside its cells beyond cloning and comparing them, so any
//! `Clone` type can be used. `Cell` covers what an engineering notebook usually puts
//! into a column: numbers, flags, labels and symbolic expressions carried as text.
use std::fmt::{self, Display};

/// enum to represent different cell types:
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// absent value, the default filler
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// symbolic expression in textual form, e.g. "F_Ed / A"
    Symbol(String),
}

impl Cell {
    pub fn symbol(expr: &str) -> Self {
        Cell::Symbol(expr.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Cell::String(s) | Cell::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Cell::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Cell::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Classifies a bare literal: integer, then float, then bool, then the `None`
    /// keyword, anything else is kept as a string.
    pub fn parse_scalar(s: &str) -> Self {
        let s = s.trim();
        if let Ok(val) = s.parse::<i64>() {
            Cell::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Cell::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Cell::Boolean(val)
        } else if s == "None" || s == "null" {
            Cell::Null
        } else {
            Cell::String(s.to_string())
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "None"),
            Cell::Boolean(val) => write!(f, "{}", val),
            Cell::Integer(val) => write!(f, "{}", val),
            Cell::Float(val) => write!(f, "{}", val),
            Cell::String(s) => write!(f, "'{}'", s),
            Cell::Symbol(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Cell {
    fn from(val: bool) -> Self {
        Cell::Boolean(val)
    }
}

impl From<i32> for Cell {
    fn from(val: i32) -> Self {
        Cell::Integer(val as i64)
    }
}

impl From<i64> for Cell {
    fn from(val: i64) -> Self {
        Cell::Integer(val)
    }
}

impl From<usize> for Cell {
    fn from(val: usize) -> Self {
        Cell::Integer(val as i64)
    }
}

impl From<f64> for Cell {
    fn from(val: f64) -> Self {
        Cell::Float(val)
    }
}

impl From<&str> for Cell {
    fn from(val: &str) -> Self {
        Cell::String(val.to_string())
    }
}

impl From<String> for Cell {
    fn from(val: String) -> Self {
        Cell::String(val)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_scalar() {
        assert_eq!(Cell::parse_scalar("123"), Cell::Integer(123));
        assert_eq!(Cell::parse_scalar(" -7 "), Cell::Integer(-7));
        assert_relative_eq!(Cell::parse_scalar("123.45").as_float().unwrap(), 123.45);
        assert_eq!(Cell::parse_scalar("true"), Cell::Boolean(true));
        assert_eq!(Cell::parse_scalar("None"), Cell::Null);
        assert_eq!(
            Cell::parse_scalar("kN/m"),
            Cell::String("kN/m".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Null.to_string(), "None");
        assert_eq!(Cell::from(3).to_string(), "3");
        assert_eq!(Cell::from("a").to_string(), "'a'");
        assert_eq!(Cell::symbol("x**2 + 1").to_string(), "x**2 + 1");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Cell::from(None::<i64>), Cell::Null);
        assert_eq!(Cell::from(Some(2.5)), Cell::Float(2.5));
        assert_eq!(Cell::from(4usize).as_integer(), Some(4));
        assert_eq!(Cell::from(4).as_float(), Some(4.0));
        assert!(Cell::default().is_null());
        assert_eq!(Cell::symbol("M_Ed").as_string().unwrap(), "M_Ed");
    }
}
