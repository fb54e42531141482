//! Built-in per-platform catalogs.
//!
//! Field sets mirror the metrics the surrounding system stores per
//! campaign and per performance row: impressions, clicks, conversions,
//! spend, revenue, and the usual derived rates, plus a few
//! platform-specific extras.

use std::collections::BTreeMap;

use metrics_model::{ImportError, Result, ValueType};

use crate::derived::DerivedMetric;
use crate::field::{CanonicalField, FieldTransform};
use crate::validator::RangeValidator;

/// Process-wide catalog of canonical fields, keyed by platform.
///
/// Built once, never mutated at run time.
#[derive(Debug)]
pub struct Registry {
    platforms: BTreeMap<&'static str, Vec<CanonicalField>>,
    derived: Vec<DerivedMetric>,
}

impl Registry {
    /// Builds the built-in catalogs for all supported platforms.
    pub fn builtin() -> Self {
        let mut platforms = BTreeMap::new();
        platforms.insert("linkedin", linkedin_fields());
        platforms.insert("google_ads", google_ads_fields());
        platforms.insert("facebook_ads", facebook_ads_fields());
        platforms.insert("custom", custom_fields());
        Self {
            platforms,
            derived: DerivedMetric::builtin(),
        }
    }

    /// Returns the catalog for a platform, required fields first.
    ///
    /// An unknown platform key is a structural failure, not a
    /// confidence issue.
    pub fn fields_for_platform(&self, platform: &str) -> Result<&[CanonicalField]> {
        self.platforms
            .get(platform)
            .map(Vec::as_slice)
            .ok_or_else(|| ImportError::UnknownPlatform(platform.to_string()))
    }

    /// Known platform keys, in stable order.
    pub fn platforms(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.platforms.keys().copied()
    }

    /// Derived metrics computed after per-field coercion.
    pub fn derived_metrics(&self) -> &[DerivedMetric] {
        &self.derived
    }
}

/// Sorts required fields ahead of optional ones, keeping declaration
/// order within each group.
fn required_first(mut fields: Vec<CanonicalField>) -> Vec<CanonicalField> {
    fields.sort_by_key(|f| !f.required);
    fields
}

fn count_field(id: &'static str, label: &'static str, aliases: &[&str]) -> CanonicalField {
    CanonicalField::new(id, label, ValueType::Number)
        .aliases(aliases)
        .validator(RangeValidator::hard_min(0.0))
        .transform(FieldTransform::NonNegativeInteger)
}

/// Fields shared by every ad platform export.
fn core_fields() -> Vec<CanonicalField> {
    vec![
        CanonicalField::new("campaign_name", "Campaign", ValueType::Text)
            .required()
            .aliases(&["campaign", "campaign name", "name", "ad campaign"])
            .pattern(r"(?i)^campaign"),
        count_field(
            "impressions",
            "Impressions",
            &["impressions", "impr", "views", "impressions served"],
        )
        .required(),
        count_field("clicks", "Clicks", &["clicks", "link clicks", "total clicks"]).required(),
        CanonicalField::new("spend", "Spend", ValueType::Currency)
            .required()
            .aliases(&["spend", "cost", "amount spent", "total spend", "spend ($)"])
            .pattern(r"(?i)\b(spend|cost)\b")
            .validator(RangeValidator::hard_min(0.0).soft_max(1_000_000.0)),
        count_field(
            "conversions",
            "Conversions",
            &["conversions", "conv", "results", "purchases"],
        ),
        CanonicalField::new("revenue", "Revenue", ValueType::Currency)
            .aliases(&["revenue", "sales", "conversion value", "total conv value"])
            .validator(RangeValidator::hard_min(0.0)),
        CanonicalField::new("ctr", "CTR", ValueType::Percentage)
            .aliases(&["ctr", "click through rate", "ctr %"])
            .pattern(r"(?i)^ctr\b")
            .validator(RangeValidator::hard(0.0, 100.0).soft_max(30.0)),
        CanonicalField::new("cpc", "CPC", ValueType::Currency)
            .aliases(&["cpc", "cost per click", "avg cpc", "avg. cpc"])
            .validator(RangeValidator::hard_min(0.0)),
        CanonicalField::new("date", "Date", ValueType::Date)
            .aliases(&["date", "day", "reporting date", "period"]),
    ]
}

fn linkedin_fields() -> Vec<CanonicalField> {
    let mut fields = core_fields();
    fields.push(count_field("leads", "Leads", &["leads", "lead gen leads"]));
    required_first(fields)
}

fn google_ads_fields() -> Vec<CanonicalField> {
    let mut fields = core_fields();
    fields.push(
        CanonicalField::new("cpm", "CPM", ValueType::Currency)
            .aliases(&["cpm", "avg cpm", "avg. cpm"])
            .validator(RangeValidator::hard_min(0.0)),
    );
    required_first(fields)
}

fn facebook_ads_fields() -> Vec<CanonicalField> {
    let mut fields = core_fields();
    fields.push(count_field("reach", "Reach", &["reach", "people reached"]));
    fields.push(
        CanonicalField::new("frequency", "Frequency", ValueType::Number)
            .aliases(&["frequency", "avg frequency"])
            .validator(RangeValidator::hard_min(0.0)),
    );
    required_first(fields)
}

/// The `custom` platform accepts arbitrary sources, so nothing is
/// required and no field can force a review on its own.
fn custom_fields() -> Vec<CanonicalField> {
    core_fields()
        .into_iter()
        .map(|mut field| {
            field.required = false;
            field
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_required_set() {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("google_ads").unwrap();
        let required: Vec<&str> = fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.id)
            .collect();
        assert_eq!(required, ["campaign_name", "impressions", "clicks", "spend"]);
    }

    #[test]
    fn custom_platform_has_no_required_fields() {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("custom").unwrap();
        assert!(fields.iter().all(|f| !f.required));
    }

    #[test]
    fn spend_alias_is_normalized() {
        let registry = Registry::builtin();
        let fields = registry.fields_for_platform("linkedin").unwrap();
        let spend = fields.iter().find(|f| f.id == "spend").unwrap();
        assert!(spend.matches_alias("amount spent"));
        assert!(spend.matches_pattern("Total Cost (USD)"));
    }
}
