//! Validated SQL identifiers and the configurable quoting style.
//!
//! Identifiers are validated once at construction against
//! `[A-Za-z_][A-Za-z0-9_$]*`, so rendering never has to re-check and the
//! quoted form needs no escaping.

use crate::error::{Error, Result};

/// Identifier quoting applied when rendering SQL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quoting {
    /// Emit identifiers bare: `users`.
    #[default]
    Bare,
    /// Emit identifiers double-quoted: `"users"`.
    Double,
}

/// A validated SQL identifier (table or column name).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Validate and wrap an identifier.
    pub fn new(name: &str) -> Result<Self> {
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(Error::InvalidIdentifier("empty identifier".to_string())),
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => {
                return Err(Error::InvalidIdentifier(format!(
                    "identifier cannot start with '{c}'"
                )));
            }
        }
        for c in chars {
            if c != '_' && c != '$' && !c.is_ascii_alphanumeric() {
                return Err(Error::InvalidIdentifier(format!(
                    "invalid character '{c}' in identifier '{name}'"
                )));
            }
        }
        Ok(Self(name.to_string()))
    }

    /// The raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn write_sql(&self, out: &mut String, quoting: Quoting) {
        match quoting {
            Quoting::Bare => out.push_str(&self.0),
            Quoting::Double => {
                out.push('"');
                out.push_str(&self.0);
                out.push('"');
            }
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = Ident::new("users").unwrap();
        assert_eq!(ident.as_str(), "users");
    }

    #[test]
    fn ident_with_underscore_and_dollar() {
        assert!(Ident::new("_private").is_ok());
        assert!(Ident::new("my_var$1").is_ok());
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(Ident::new("").is_err());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(Ident::new("1table").is_err());
    }

    #[test]
    fn ident_rejects_space() {
        assert!(Ident::new("my table").is_err());
    }

    #[test]
    fn ident_rejects_quote() {
        assert!(Ident::new("users\"; DROP TABLE x; --").is_err());
    }

    #[test]
    fn render_bare_and_quoted() {
        let ident = Ident::new("age").unwrap();
        let mut bare = String::new();
        ident.write_sql(&mut bare, Quoting::Bare);
        assert_eq!(bare, "age");

        let mut quoted = String::new();
        ident.write_sql(&mut quoted, Quoting::Double);
        assert_eq!(quoted, "\"age\"");
    }
}
