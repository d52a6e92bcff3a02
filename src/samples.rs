//! Built-in demo experiments, used by `cro-stats demo` and in tests.

use crate::model::{
    Experiment, ExperimentStatus, ExperimentType, TargetingCategory, TargetingOperator,
    TargetingRule, Variant,
};

fn rule(id: &str, category: TargetingCategory, attribute: &str, operator: TargetingOperator, value: &str) -> TargetingRule {
    TargetingRule {
        id: id.into(),
        category,
        attribute: attribute.into(),
        operator,
        value: value.into(),
    }
}

/// Three experiments covering a clear winner, a multivariate test without a
/// winner, and a draft with no traffic yet.
pub fn sample_experiments() -> Vec<Experiment> {
    vec![
        Experiment {
            id: "exp_1".into(),
            name: "Checkout Page - CTA Color".into(),
            kind: ExperimentType::Ab,
            status: ExperimentStatus::Running,
            url: "https://myshop.com/checkout".into(),
            start_date: Some("2023-10-01".into()),
            variants: vec![
                Variant::new("v1_1", "Control (Blue)", 1250, 45).with_weight(50.0).control(),
                Variant::new("v1_2", "Variant B (Green)", 1240, 78).with_weight(50.0),
            ],
            targeting: vec![rule("t1", TargetingCategory::Device, "Type", TargetingOperator::Equals, "Mobile")],
        },
        Experiment {
            id: "exp_2".into(),
            name: "Homepage Hero Headline".into(),
            kind: ExperimentType::Mvt,
            status: ExperimentStatus::Completed,
            url: "https://myshop.com/".into(),
            start_date: Some("2023-09-15".into()),
            variants: vec![
                Variant::new("v2_1", "Original", 5000, 120).with_weight(33.0).control(),
                Variant::new("v2_2", "Headline A", 4950, 135).with_weight(33.0),
                Variant::new("v2_3", "Headline B", 4980, 110).with_weight(34.0),
            ],
            targeting: Vec::new(),
        },
        Experiment {
            id: "exp_3".into(),
            name: "Product Page Layout v2".into(),
            kind: ExperimentType::Split,
            status: ExperimentStatus::Draft,
            url: "https://myshop.com/product/sunglasses".into(),
            start_date: None,
            variants: vec![
                Variant::new("v3_1", "Original URL", 0, 0).with_weight(50.0).control(),
                Variant::new("v3_2", "New Layout URL", 0, 0).with_weight(50.0),
            ],
            targeting: vec![rule(
                "t2",
                TargetingCategory::WooCommerce,
                "Total Spent",
                TargetingOperator::GreaterThan,
                "100",
            )],
        },
    ]
}
