//! Core movement domain types.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category::CategoryId};

/// Database identifier for a movement.
pub type MovementId = i64;

/// Whether money was put aside or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Money put aside.
    Saving,
    /// Money spent.
    Expense,
}

impl MovementKind {
    /// Interpret the kind submitted in a form.
    ///
    /// Anything other than exactly "saving" or "expense" is treated as an expense.
    pub fn coerce(kind: &str) -> Self {
        match kind {
            "saving" => Self::Saving,
            _ => Self::Expense,
        }
    }

    /// The value stored in the database and submitted by forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saving => "saving",
            Self::Expense => "expense",
        }
    }

    /// The human readable name shown on pages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saving => "Saving",
            Self::Expense => "Expense",
        }
    }
}

impl Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for MovementKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MovementKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "saving" => Ok(Self::Saving),
            "expense" => Ok(Self::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown movement kind {other:?}").into(),
            )),
        }
    }
}

/// A strictly positive, finite amount of money.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `amount` is zero, negative, NaN or infinite.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::InvalidAmount(amount.to_string()))
        }
    }

    /// Parse the amount text submitted in a form, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] holding `text` if it is not a number or
    /// the number is not greater than zero.
    pub fn parse(text: &str) -> Result<Self, Error> {
        text.trim()
            .parse::<f64>()
            .ok()
            .and_then(|amount| Self::new(amount).ok())
            .ok_or_else(|| Error::InvalidAmount(text.to_owned()))
    }

    /// Create an amount without validation, e.g. for amounts read back from the database.
    ///
    /// The caller should ensure that the amount is greater than zero.
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// A recorded saving or expense.
///
/// To create a new `Movement`, use [Movement::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// The ID of the movement.
    pub id: MovementId,
    /// Whether the movement is a saving or an expense.
    pub kind: MovementKind,
    /// The amount of money saved or spent.
    pub amount: Amount,
    /// Free text, empty when the user left no note.
    pub note: String,
    /// When the movement was recorded, in UTC.
    pub timestamp: OffsetDateTime,
    /// The category of an expense. Savings never have a category.
    pub category_id: Option<CategoryId>,
}

impl Movement {
    /// Start building a new movement.
    ///
    /// Shortcut for [MovementBuilder] for discoverability.
    pub fn build(kind: MovementKind, amount: Amount) -> MovementBuilder {
        MovementBuilder {
            kind,
            amount,
            note: String::new(),
            timestamp: None,
            category_id: None,
        }
    }
}

/// A movement that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementBuilder {
    pub kind: MovementKind,
    pub amount: Amount,
    pub note: String,
    /// Defaults to the moment the movement is saved.
    pub timestamp: Option<OffsetDateTime>,
    pub category_id: Option<CategoryId>,
}

impl MovementBuilder {
    /// Set the note, surrounding whitespace is removed.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.trim().to_owned();
        self
    }

    /// Set the category. Ignored for savings.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = match self.kind {
            MovementKind::Expense => category_id,
            MovementKind::Saving => None,
        };
        self
    }

    /// Set when the movement happened instead of using the time it is saved.
    pub fn timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Form data for creating a movement.
///
/// Every field is kept as text so that the handler decides how to treat bad input.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MovementForm {
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub monto: String,
    #[serde(default)]
    pub nota: String,
    #[serde(default)]
    pub categoria_id: Option<String>,
}


#[cfg(test)]
mod amount_tests {
    use crate::Error;

    use super::Amount;

    #[test]
    fn parse_accepts_positive_numbers() {
        assert_eq!(Amount::parse("50"), Ok(Amount::new_unchecked(50.0)));
        assert_eq!(Amount::parse("0.01"), Ok(Amount::new_unchecked(0.01)));
        assert_eq!(Amount::parse(" 12.5 "), Ok(Amount::new_unchecked(12.5)));
        assert_eq!(Amount::parse("1e3"), Ok(Amount::new_unchecked(1000.0)));
    }

    #[test]
    fn parse_rejects_zero_and_negative_numbers() {
        for text in ["0", "0.0", "-0", "-5", "-0.01"] {
            assert_eq!(
                Amount::parse(text),
                Err(Error::InvalidAmount(text.to_owned()))
            );
        }
    }

    #[test]
    fn parse_rejects_text() {
        for text in ["", "   ", "abc", "5 dollars", "1,000"] {
            assert_eq!(
                Amount::parse(text),
                Err(Error::InvalidAmount(text.to_owned()))
            );
        }
    }

    #[test]
    fn parse_rejects_nan_and_infinity() {
        for text in ["NaN", "inf", "-inf", "infinity"] {
            assert!(Amount::parse(text).is_err(), "want {text:?} to be rejected");
        }
    }
}
