//! Collects field-keyed failures during one validation pass.

use tracing::debug;

use crf_model::{ErrorPolicy, FieldError, ValidationResult, ViolationKind};

/// Error sink for a single validation pass.
///
/// Sub-checks run through [`ErrorAccumulator::check`]. Under
/// [`ErrorPolicy::StopAtFirst`] every check after the first failure is
/// skipped; under [`ErrorPolicy::CollectAll`] all checks run and the first
/// error per field is kept, unless an eligibility exclusion arrives later.
#[derive(Debug)]
pub struct ErrorAccumulator {
    policy: ErrorPolicy,
    errors: Vec<FieldError>,
}

impl ErrorAccumulator {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            errors: Vec::new(),
        }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// True once no further checks will run.
    pub fn is_halted(&self) -> bool {
        self.policy == ErrorPolicy::StopAtFirst && !self.errors.is_empty()
    }

    /// Run one sub-check unless the pass has already halted.
    pub fn check<F>(&mut self, check: F)
    where
        F: FnOnce() -> Result<(), FieldError>,
    {
        if self.is_halted() {
            return;
        }
        if let Err(error) = check() {
            self.push(error);
        }
    }

    /// Record an error. A field keeps its first error, except that an
    /// eligibility exclusion takes the place of any other error on its field.
    pub fn push(&mut self, error: FieldError) {
        debug!(field = %error.field, kind = %error.kind, "field error");
        match self
            .errors
            .iter_mut()
            .find(|existing| existing.field == error.field)
        {
            Some(existing)
                if error.kind == ViolationKind::EligibilityExclusion
                    && existing.kind != ViolationKind::EligibilityExclusion =>
            {
                *existing = error;
            }
            Some(_) => {}
            None => self.errors.push(error),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult::from_errors(self.errors)
    }
}
