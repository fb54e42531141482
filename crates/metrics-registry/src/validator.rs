//! Range validation for coerced values.

use metrics_model::{MetricValue, ValueType};

/// Outcome of validating one coerced value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    /// Soft-range violation. Recorded as a warning.
    Warning(String),
    /// Hard-invariant violation. Marks the row erroneous.
    Critical(String),
}

/// Numeric range bounds for a field.
///
/// Hard bounds are invariants (a count metric cannot be negative);
/// soft bounds flag implausible-but-possible values for review.
/// Percentage bounds are expressed in percent points, so a ctr bound of
/// `[0, 100]` is checked against `fraction * 100`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeValidator {
    pub hard_min: Option<f64>,
    pub hard_max: Option<f64>,
    pub soft_min: Option<f64>,
    pub soft_max: Option<f64>,
}

impl RangeValidator {
    pub fn hard(min: f64, max: f64) -> Self {
        Self {
            hard_min: Some(min),
            hard_max: Some(max),
            ..Self::default()
        }
    }

    pub fn hard_min(min: f64) -> Self {
        Self {
            hard_min: Some(min),
            ..Self::default()
        }
    }

    pub fn soft_max(mut self, max: f64) -> Self {
        self.soft_max = Some(max);
        self
    }

    pub fn check(&self, field_label: &str, value: &MetricValue) -> ValidationOutcome {
        let Some(raw) = value.as_f64() else {
            return ValidationOutcome::Ok;
        };
        // Bounds are written in the unit reviewers see.
        let v = if value.value_type() == ValueType::Percentage {
            raw * 100.0
        } else {
            raw
        };

        if let Some(min) = self.hard_min
            && v < min
        {
            return ValidationOutcome::Critical(format!(
                "{field_label} is {} but must be at least {min}",
                value.render()
            ));
        }
        if let Some(max) = self.hard_max
            && v > max
        {
            return ValidationOutcome::Critical(format!(
                "{field_label} is {} but must be at most {max}",
                value.render()
            ));
        }
        if let Some(min) = self.soft_min
            && v < min
        {
            return ValidationOutcome::Warning(format!(
                "{field_label} of {} is below the expected range (>= {min})",
                value.render()
            ));
        }
        if let Some(max) = self.soft_max
            && v > max
        {
            return ValidationOutcome::Warning(format!(
                "{field_label} of {} is above the expected range (<= {max})",
                value.render()
            ));
        }
        ValidationOutcome::Ok
    }
}
