pub mod boolean_split;
pub mod column_list;
pub mod histogram;
pub mod ranking_table;
pub mod stats_panel;

pub use boolean_split::BooleanSplitView;
pub use column_list::ColumnList;
pub use histogram::HistogramView;
pub use ranking_table::RankingTable;
pub use stats_panel::StatsPanel;

/// Display formatting for server-reported numbers.
///
/// Absent values show as N/A; near-integers drop the fraction; very small
/// magnitudes switch to scientific notation.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let Some(v) = value else {
        return "N/A".to_string();
    };
    if v.is_nan() {
        return "N/A".to_string();
    }
    if v != 0.0 && v.abs() < 0.01 {
        return format!("{v:.decimals$e}");
    }
    if (v - v.round()).abs() < 1e-9 {
        return format!("{}", v.round() as i64);
    }
    format!("{v:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None, 2), "N/A");
        assert_eq!(format_number(Some(f64::NAN), 2), "N/A");
        assert_eq!(format_number(Some(30.0), 2), "30");
        assert_eq!(format_number(Some(3.14159), 2), "3.14");
        assert_eq!(format_number(Some(0.0001), 2), "1.00e-4");
        assert_eq!(format_number(Some(0.0), 2), "0");
    }
}
