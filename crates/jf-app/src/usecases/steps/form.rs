//! Edit buffer shared by the step controllers.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use jf_core::validation::{Field, FieldErrors, StepSchema, ValidationContext, ValidationError};

/// Transient field values of one step, revalidated on every change.
///
/// Errors are computed for every field but only reported for touched ones.
pub struct StepForm<S: StepSchema> {
    values: S::Input,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    ctx: ValidationContext,
    _schema: PhantomData<fn() -> S>,
}

impl<S: StepSchema> StepForm<S> {
    pub fn new(values: S::Input, ctx: ValidationContext) -> Self {
        let errors = S::validate(&values, &ctx);
        Self {
            values,
            errors,
            touched: BTreeSet::new(),
            ctx,
            _schema: PhantomData,
        }
    }

    pub fn values(&self) -> &S::Input {
        &self.values
    }

    /// Change one field and revalidate the whole buffer.
    pub fn edit(&mut self, field: Field, apply: impl FnOnce(&mut S::Input)) {
        self.touched.insert(field);
        self.update(apply);
    }

    /// Change a value that has no rule of its own.
    pub fn update(&mut self, apply: impl FnOnce(&mut S::Input)) {
        apply(&mut self.values);
        self.errors = S::validate(&self.values, &self.ctx);
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// Reveal every current error, as a submit attempt does.
    pub fn touch_all(&mut self) {
        self.touched.extend(self.errors.keys().copied());
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Error to display for `field`.
    pub fn error(&self, field: Field) -> Option<&ValidationError> {
        if self.is_touched(field) {
            self.errors.get(&field)
        } else {
            None
        }
    }

    pub fn visible_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
            .map(|(field, err)| (*field, err.clone()))
            .collect()
    }

    pub fn all_errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn can_continue(&self) -> bool {
        self.errors.is_empty()
    }
}
