//! Structural checks on filters and decoded records.
//!
//! Rules are explicit `(field, predicate, message)` checks collected by
//! [`Rules`] and reported together as [`ValidationErrors`].

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// `YYYY-MM-DD`, the only date format the API accepts.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Types that can check their own structure.
pub trait Validate {
    /// Run every rule, returning all violations.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the offending field, e.g. `transactions[2].date`.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

/// All rules that failed for a value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The individual failures.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Check if a field failed.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a `YYYY-MM-DD` calendar date.
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && Date::parse(value, DATE_FORMAT).is_ok()
}

/// Collects rule failures for one value.
#[derive(Debug, Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    /// Start an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(mut self, field: impl Into<String>, ok: bool, message: impl Into<String>) -> Self {
        if !ok {
            self.errors.push(FieldError {
                field: field.into(),
                message: message.into(),
            });
        }
        self
    }

    /// `value` must be a `YYYY-MM-DD` date.
    pub fn date(self, field: impl Into<String>, value: &str) -> Self {
        self.check(field, is_iso_date(value), format!("{value:?} is not a YYYY-MM-DD date"))
    }

    /// `value`, when present, must be a `YYYY-MM-DD` date.
    pub fn optional_date(self, field: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.date(field, value),
            None => self,
        }
    }

    /// `value`, when present, must be one of `allowed`.
    pub fn one_of(self, field: impl Into<String>, value: Option<&str>, allowed: &[&str]) -> Self {
        match value {
            Some(value) => self.check(
                field,
                allowed.contains(&value),
                format!("{value:?} is not one of {}", allowed.join(", ")),
            ),
            None => self,
        }
    }

    /// Merge the failures of a nested value under `prefix`.
    pub fn nested<V: Validate + ?Sized>(mut self, prefix: &str, value: &V) -> Self {
        if let Err(nested) = value.validate() {
            self.errors
                .extend(nested.0.into_iter().map(|err| FieldError {
                    field: format!("{prefix}.{}", err.field),
                    message: err.message,
                }));
        }
        self
    }

    /// Merge the failures of every element of a list under `prefix[i]`.
    pub fn each<'a, V, I>(self, prefix: &str, values: I) -> Self
    where
        V: Validate + 'a,
        I: IntoIterator<Item = &'a V>,
    {
        values
            .into_iter()
            .enumerate()
            .fold(self, |rules, (i, value)| rules.nested(&format!("{prefix}[{i}]"), value))
    }

    /// Finish, failing if any rule did.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

impl<V: Validate> Validate for [V] {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Rules::new().each("", self).finish()
    }
}

impl<V: Validate> Validate for Vec<V> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.as_slice().validate()
    }
}
