//! Derived metrics computed from already-coerced fields.

use std::collections::BTreeMap;

use metrics_model::MetricValue;

type ComputeFn = fn(&BTreeMap<String, MetricValue>) -> Option<MetricValue>;

/// A metric computed per row from other coerced fields.
///
/// Computed only when every input field is present in the row and the
/// target field itself is absent; rows missing a prerequisite are
/// skipped silently.
#[derive(Debug, Clone)]
pub struct DerivedMetric {
    pub field_id: &'static str,
    pub inputs: &'static [&'static str],
    pub compute: ComputeFn,
}

impl DerivedMetric {
    pub fn builtin() -> Vec<DerivedMetric> {
        vec![
            DerivedMetric {
                field_id: "ctr",
                inputs: &["clicks", "impressions"],
                compute: derive_ctr,
            },
            DerivedMetric {
                field_id: "cpc",
                inputs: &["spend", "clicks"],
                compute: derive_cpc,
            },
        ]
    }

    /// True when every prerequisite is present in the row.
    pub fn inputs_present(&self, values: &BTreeMap<String, MetricValue>) -> bool {
        self.inputs.iter().all(|id| values.contains_key(*id))
    }
}

fn derive_ctr(values: &BTreeMap<String, MetricValue>) -> Option<MetricValue> {
    let clicks = values.get("clicks")?.as_f64()?;
    let impressions = values.get("impressions")?.as_f64()?;
    if impressions <= 0.0 {
        return None;
    }
    Some(MetricValue::Percentage(clicks / impressions))
}

fn derive_cpc(values: &BTreeMap<String, MetricValue>) -> Option<MetricValue> {
    let spend = values.get("spend")?.as_f64()?;
    let clicks = values.get("clicks")?.as_f64()?;
    if clicks <= 0.0 {
        return None;
    }
    Some(MetricValue::Currency(spend / clicks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, MetricValue)]) -> BTreeMap<String, MetricValue> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn ctr_from_clicks_and_impressions() {
        let values = row(&[
            ("clicks", MetricValue::Number(45.0)),
            ("impressions", MetricValue::Number(1000.0)),
        ]);
        let ctr = derive_ctr(&values).unwrap();
        assert_eq!(ctr, MetricValue::Percentage(0.045));
    }

    #[test]
    fn zero_denominator_skips_derivation() {
        let values = row(&[
            ("spend", MetricValue::Currency(10.0)),
            ("clicks", MetricValue::Number(0.0)),
        ]);
        assert!(derive_cpc(&values).is_none());
    }

    #[test]
    fn missing_input_is_detected() {
        let metric = &DerivedMetric::builtin()[0];
        let values = row(&[("clicks", MetricValue::Number(45.0))]);
        assert!(!metric.inputs_present(&values));
    }
}
