//! Canonical field registry.
//!
//! The registry is the static catalog of target metric fields, one list
//! per platform. It is built once at startup and read-only afterwards;
//! nothing in the engine mutates it at run time, which is what keeps
//! repeated imports reproducible.

pub mod catalog;
pub mod derived;
pub mod field;
pub mod validator;

pub use catalog::Registry;
pub use derived::DerivedMetric;
pub use field::{CanonicalField, FieldTransform, normalize_header};
pub use validator::{RangeValidator, ValidationOutcome};

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_model::ImportError;

    #[test]
    fn unknown_platform_is_a_hard_failure() {
        let registry = Registry::builtin();
        let error = registry.fields_for_platform("tiktok").unwrap_err();
        assert!(matches!(error, ImportError::UnknownPlatform(p) if p == "tiktok"));
    }

    #[test]
    fn required_fields_come_first() {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("linkedin").unwrap();
        let first_optional = fields.iter().position(|f| !f.required);
        if let Some(boundary) = first_optional {
            assert!(
                fields[boundary..].iter().all(|f| !f.required),
                "optional fields must not precede required ones"
            );
        }
    }

    #[test]
    fn all_builtin_platforms_resolve() {
        let registry = Registry::builtin();
        for platform in ["linkedin", "google_ads", "facebook_ads", "custom"] {
            let fields = registry.fields_for_platform(platform).unwrap();
            assert!(!fields.is_empty(), "{platform} catalog is empty");
        }
    }
}
