//! Field rule primitives.
//!
//! Each primitive is a pure function of already-extracted field state and
//! surfaces at most one [`FieldError`], keyed to the dependent field.
//! [`FieldRule`] packages a primitive with typed accessors so that forms can
//! declare their conditional fields as tables.

use crf_model::{FieldError, Presence, ViolationKind};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const APPLICABLE_MESSAGE: &str = "This field is applicable.";
pub const NOT_APPLICABLE_MESSAGE: &str = "This field is not applicable.";

/// How a triggered rule constrains its dependent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    /// Dependent must be answered when triggered.
    Required,
    /// Dependent must be answered when triggered and "not applicable" otherwise.
    Applicable,
    /// Set-valued dependent must be non-empty when triggered.
    MultiselectRequired,
    /// Free-text dependent must be filled when the controlling answer is OTHER.
    OtherSpecifyRequired,
}

/// `field` must hold an answer when `triggered`.
///
/// A "not applicable" answer does not satisfy a required field.
pub fn required_if(
    triggered: bool,
    field: &str,
    presence: Presence,
    message: Option<&str>,
) -> Result<(), FieldError> {
    if triggered && presence != Presence::Value {
        return Err(FieldError::new(
            field,
            ViolationKind::FieldRequired,
            message.unwrap_or(REQUIRED_MESSAGE),
        ));
    }
    Ok(())
}

/// `field` must be answered when `triggered` and "not applicable" when not.
pub fn applicable_if(
    triggered: bool,
    field: &str,
    presence: Presence,
    message: Option<&str>,
) -> Result<(), FieldError> {
    match (triggered, presence) {
        (true, Presence::NotApplicable) => Err(FieldError::new(
            field,
            ViolationKind::FieldApplicability,
            message.unwrap_or(APPLICABLE_MESSAGE),
        )),
        (false, Presence::Blank | Presence::Value) => Err(FieldError::new(
            field,
            ViolationKind::FieldApplicability,
            message.unwrap_or(NOT_APPLICABLE_MESSAGE),
        )),
        _ => Ok(()),
    }
}

/// Multi-select `field` must have at least one selection when `triggered`.
pub fn multiselect_required_if(
    triggered: bool,
    field: &str,
    presence: Presence,
    message: Option<&str>,
) -> Result<(), FieldError> {
    if triggered && presence.is_blank() {
        return Err(FieldError::new(
            field,
            ViolationKind::FieldRequired,
            message.unwrap_or(REQUIRED_MESSAGE),
        ));
    }
    Ok(())
}

/// `other_field` must be filled in when the controlling answer is OTHER.
pub fn other_specify_required(
    is_other: bool,
    other_field: &str,
    presence: Presence,
    message: Option<&str>,
) -> Result<(), FieldError> {
    if is_other && presence.is_blank() {
        return Err(FieldError::new(
            other_field,
            ViolationKind::FieldRequired,
            message.unwrap_or(REQUIRED_MESSAGE),
        ));
    }
    Ok(())
}

/// A declarative conditional rule over record type `R`.
///
/// The controlling field is read through `controlling_value`; the rule is
/// triggered when that value equals one of `trigger`. The dependent field is
/// read through `dependent_value` as a [`Presence`].
pub struct FieldRule<R, C: ?Sized + 'static> {
    pub controlling: &'static str,
    pub trigger: &'static [&'static C],
    pub dependent: &'static str,
    pub mode: RuleMode,
    pub message: Option<&'static str>,
    controlling_value: fn(&R) -> Option<&C>,
    dependent_value: fn(&R) -> Presence,
}

impl<R, C: ?Sized + PartialEq + 'static> FieldRule<R, C> {
    pub fn new(
        mode: RuleMode,
        controlling: &'static str,
        controlling_value: fn(&R) -> Option<&C>,
        trigger: &'static [&'static C],
        dependent: &'static str,
        dependent_value: fn(&R) -> Presence,
    ) -> Self {
        debug_assert_ne!(
            controlling, dependent,
            "a rule cannot make a field depend on itself"
        );
        Self {
            controlling,
            trigger,
            dependent,
            mode,
            message: None,
            controlling_value,
            dependent_value,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn is_triggered(&self, record: &R) -> bool {
        (self.controlling_value)(record)
            .is_some_and(|value| self.trigger.iter().any(|trigger| *trigger == value))
    }

    pub fn apply(&self, record: &R) -> Result<(), FieldError> {
        let triggered = self.is_triggered(record);
        let presence = (self.dependent_value)(record);
        match self.mode {
            RuleMode::Required => required_if(triggered, self.dependent, presence, self.message),
            RuleMode::Applicable => {
                applicable_if(triggered, self.dependent, presence, self.message)
            }
            RuleMode::MultiselectRequired => {
                multiselect_required_if(triggered, self.dependent, presence, self.message)
            }
            RuleMode::OtherSpecifyRequired => {
                other_specify_required(triggered, self.dependent, presence, self.message)
            }
        }
    }
}

/// Build a [`FieldRule`] from two fields of a record struct.
///
/// The field names double as the error keys, so a typo is a compile error.
/// Use `deref` for `Option<String>` controlling fields compared against
/// string tokens.
macro_rules! field_rule {
    ($mode:expr, $record:ty, $controlling:ident in $trigger:expr => $dependent:ident) => {
        $crate::rules::FieldRule::new(
            $mode,
            stringify!($controlling),
            |record: &$record| record.$controlling.as_ref(),
            $trigger,
            stringify!($dependent),
            |record: &$record| crf_model::FieldValue::presence(&record.$dependent),
        )
    };
    ($mode:expr, $record:ty, deref $controlling:ident in $trigger:expr => $dependent:ident) => {
        $crate::rules::FieldRule::new(
            $mode,
            stringify!($controlling),
            |record: &$record| record.$controlling.as_deref(),
            $trigger,
            stringify!($dependent),
            |record: &$record| crf_model::FieldValue::presence(&record.$dependent),
        )
    };
}

pub(crate) use field_rule;
