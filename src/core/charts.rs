use crate::core::view_state::{BoolCounts, Histogram};

/// Chart-ready form of a categorical histogram.
///
/// Pure transformation target for committed numeric results; never contacts
/// the remote collaborator. The TUI widget renders from this directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Whether values are weighted sums rather than raw counts
    pub weighted: bool,
}

impl HistogramChart {
    pub fn update(&mut self, column: &str, histogram: &Histogram, weighted_by: Option<&str>) {
        self.title = format!("Histogram for \"{column}\"");
        self.labels = histogram.labels.clone();
        self.values = histogram.values.clone();
        self.weighted = weighted_by.is_some();
    }

    /// Neutral empty state, used when no column is selected or on reset
    pub fn reset(&mut self) {
        *self = Self {
            title: "Histogram".to_string(),
            ..Self::default()
        };
    }

    /// Label for the value axis, naming count vs weighted sum
    pub fn value_label(&self) -> &'static str {
        if self.weighted {
            "Sum of Weights"
        } else {
            "Frequency"
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Chart-ready form of a two-category boolean split
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSplitChart {
    pub title: String,
    pub true_count: f64,
    pub false_count: f64,
    pub weighted: bool,
}

impl BooleanSplitChart {
    pub fn update(&mut self, column: &str, counts: &BoolCounts, weighted_by: Option<&str>) {
        self.title = format!("Distribution for \"{column}\"");
        self.true_count = counts.true_count;
        self.false_count = counts.false_count;
        self.weighted = weighted_by.is_some();
    }

    pub fn reset(&mut self) {
        *self = Self {
            title: "Boolean Distribution".to_string(),
            ..Self::default()
        };
    }

    pub fn value_label(&self) -> &'static str {
        if self.weighted {
            "Weighted Proportion"
        } else {
            "Count"
        }
    }

    pub fn total(&self) -> f64 {
        self.true_count + self.false_count
    }

    /// Share of true values in [0, 1]; 0 when nothing is bound
    pub fn true_ratio(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.true_count / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_update_and_reset() {
        let mut chart = HistogramChart::default();
        let histogram = Histogram {
            labels: vec!["0-10".to_string(), "10-20".to_string()],
            values: vec![2.0, 5.0],
        };

        chart.update("age", &histogram, None);
        assert_eq!(chart.title, "Histogram for \"age\"");
        assert_eq!(chart.value_label(), "Frequency");
        assert!(!chart.is_empty());

        chart.update("age", &histogram, Some("popularity"));
        assert_eq!(chart.value_label(), "Sum of Weights");

        chart.reset();
        assert!(chart.is_empty());
        assert_eq!(chart.title, "Histogram");
        assert!(!chart.weighted);
    }

    #[test]
    fn test_boolean_split_ratio() {
        let mut chart = BooleanSplitChart::default();
        assert_eq!(chart.true_ratio(), 0.0);

        chart.update(
            "active",
            &BoolCounts {
                true_count: 3.0,
                false_count: 1.0,
            },
            None,
        );
        assert_eq!(chart.true_ratio(), 0.75);
        assert_eq!(chart.value_label(), "Count");

        chart.reset();
        assert_eq!(chart.total(), 0.0);
    }
}
