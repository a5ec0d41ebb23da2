//! Field-level rules shared by every resource schema.

use crate::error::{Constraint, FieldViolation, ValidationError};
use crate::types::{EntityId, Timestamp, timestamp};

use super::Patch;

/// Whether a field must be present and whether it may be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Required,
    Optional,
    Nullable,
}

/// Full (create) or partial (update) validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Create,
    Partial,
}

impl Mode {
    /// Presence for a field that is mandatory on create.
    pub(crate) fn required(self) -> Presence {
        match self {
            Mode::Create => Presence::Required,
            Mode::Partial => Presence::Optional,
        }
    }
}

/// A string enum accepted by [`Checker::choice`].
pub(crate) trait Choice: Sized {
    const ALLOWED: &'static [&'static str];

    fn from_wire(s: &str) -> Option<Self>;
}

/// Collects violations across every field of one input.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    violations: Vec<FieldViolation>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail(&mut self, field: &str, constraint: Constraint) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            constraint,
        });
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.violations,
        }
    }

    /// Returns `Ok(())` if nothing failed so far.
    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    /// Apply presence rules, then `check` to a set value.
    pub(crate) fn check<T, U>(
        &mut self,
        field: &str,
        value: Patch<T>,
        presence: Presence,
        check: impl FnOnce(&mut Self, &str, T) -> Option<U>,
    ) -> Patch<U> {
        match value {
            Patch::Absent => {
                if presence == Presence::Required {
                    self.fail(field, Constraint::Required);
                }
                Patch::Absent
            }
            Patch::Null if presence == Presence::Nullable => Patch::Null,
            Patch::Null => {
                self.fail(field, Constraint::NotNull);
                Patch::Absent
            }
            Patch::Value(v) => Patch::optional(check(self, field, v)),
        }
    }

    /// A string whose character count lies in `min..=max`. Over-length input is
    /// rejected, never truncated.
    pub(crate) fn text(&mut self, field: &str, value: String, min: usize, max: usize) -> Option<String> {
        let len = value.chars().count();
        if len < min {
            self.fail(field, Constraint::MinLength { min });
            None
        } else if len > max {
            self.fail(field, Constraint::MaxLength { max });
            None
        } else {
            Some(value)
        }
    }

    pub(crate) fn uuid(&mut self, field: &str, value: String) -> Option<EntityId> {
        match EntityId::parse_field(&value, field) {
            Ok(id) => Some(id),
            Err(_) => {
                self.fail(field, Constraint::Uuid);
                None
            }
        }
    }

    /// An integral number in `min..=max`.
    pub(crate) fn int(&mut self, field: &str, value: f64, min: i64, max: i64) -> Option<i64> {
        if !value.is_finite() || value.fract() != 0.0 {
            self.fail(field, Constraint::Integer);
            return None;
        }
        if value < min as f64 || value > max as f64 {
            self.fail(field, Constraint::Range { min, max });
            return None;
        }
        Some(value as i64)
    }

    /// Any finite number in `min..=max`; fractions are allowed.
    pub(crate) fn number(&mut self, field: &str, value: f64, min: i64, max: i64) -> Option<f64> {
        if !value.is_finite() {
            self.fail(field, Constraint::Type { expected: "number" });
            return None;
        }
        if value < min as f64 || value > max as f64 {
            self.fail(field, Constraint::Range { min, max });
            return None;
        }
        Some(value)
    }

    pub(crate) fn timestamp(&mut self, field: &str, value: String) -> Option<Timestamp> {
        match timestamp::parse(&value, field) {
            Ok(ts) => Some(ts),
            Err(err) => {
                self.violations.extend(err.violations);
                None
            }
        }
    }

    pub(crate) fn email(&mut self, field: &str, value: String) -> Option<String> {
        let value = self.text(field, value, 3, 254)?;
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Some(value)
            }
            _ => {
                self.fail(field, Constraint::Email);
                None
            }
        }
    }

    pub(crate) fn choice<E: Choice>(&mut self, field: &str, value: String) -> Option<E> {
        let parsed = E::from_wire(&value);
        if parsed.is_none() {
            self.fail(field, Constraint::OneOf { allowed: E::ALLOWED });
        }
        parsed
    }

    /// A list of strings, each at most `max` characters. Elements are
    /// reported as `field[index]`.
    pub(crate) fn string_list(&mut self, field: &str, values: Vec<String>, max: usize) -> Option<Vec<String>> {
        let before = self.violations.len();
        for (i, value) in values.iter().enumerate() {
            if value.chars().count() > max {
                self.fail(&format!("{field}[{i}]"), Constraint::MaxLength { max });
            }
        }
        (self.violations.len() == before).then_some(values)
    }

    /// A non-empty list of UUIDs.
    pub(crate) fn uuid_list(&mut self, field: &str, values: Vec<String>) -> Option<Vec<EntityId>> {
        if values.is_empty() {
            self.fail(field, Constraint::NonEmptyList);
            return None;
        }
        let before = self.violations.len();
        let ids: Vec<EntityId> = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| self.uuid(&format!("{field}[{i}]"), v))
            .collect();
        (self.violations.len() == before).then_some(ids)
    }
}
