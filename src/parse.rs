use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::record::MetricsRecord;

/// Parse CSV text into one record per data row.
///
/// The first row is the header; fields are bound to headers by position
/// and coerced per cell. Blank lines are skipped, and short rows keep
/// whatever fields they have rather than failing the whole document.
pub fn parse_metrics_csv(text: &str) -> Result<Vec<MetricsRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("csv header row unreadable")?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.context("csv row unreadable")?;
        let mut record = MetricsRecord::new();
        for (i, field) in row.iter().enumerate() {
            match headers.get(i) {
                Some(header) if !header.is_empty() => record.insert(header, field),
                _ => {}
            }
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MetricKey;

    #[test]
    fn test_parse_single_data_row() {
        let rows = parse_metrics_csv("MAE,RMSE,R2,MAPE\n12.3456789,45.6,0.912,0.0567\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(12.3456789));
        assert_eq!(rows[0].metric(MetricKey::Rmse), Some(45.6));
        assert_eq!(rows[0].metric(MetricKey::R2), Some(0.912));
        assert_eq!(rows[0].metric(MetricKey::Mape), Some(0.0567));
    }

    #[test]
    fn test_parse_header_only_yields_no_rows() {
        let rows = parse_metrics_csv("MAE,RMSE,R2,MAPE\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_empty_text_yields_no_rows() {
        let rows = parse_metrics_csv("").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse_metrics_csv("MAE,RMSE\n\n1.5,2.5\n\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(1.5));
    }

    #[test]
    fn test_parse_short_row_keeps_present_fields() {
        let rows = parse_metrics_csv("MAE,RMSE,R2,MAPE\n12.5\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(12.5));
        assert_eq!(rows[0].metric(MetricKey::Rmse), None);
    }

    #[test]
    fn test_parse_only_first_row_matters_to_callers() {
        let rows = parse_metrics_csv("MAE\n1.0\n2.0\n3.0\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(1.0));
    }

    #[test]
    fn test_parse_trims_header_whitespace() {
        let rows = parse_metrics_csv(" MAE , RMSE \n1.0,2.0\n").unwrap();
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(1.0));
        assert_eq!(rows[0].metric(MetricKey::Rmse), Some(2.0));
    }

    #[test]
    fn test_parse_empty_cells_are_absent() {
        let rows = parse_metrics_csv("MAE,RMSE,R2\n,45.6,\n").unwrap();
        assert_eq!(rows[0].metric(MetricKey::Mae), None);
        assert_eq!(rows[0].metric(MetricKey::Rmse), Some(45.6));
        assert_eq!(rows[0].metric(MetricKey::R2), None);
    }

    #[test]
    fn test_parse_arbitrary_column_order() {
        let rows = parse_metrics_csv("MAPE,R2,MAE,RMSE\n0.05,0.9,1.0,2.0\n").unwrap();
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(1.0));
        assert_eq!(rows[0].metric(MetricKey::Mape), Some(0.05));
    }

    #[test]
    fn test_parse_extra_columns_ignored() {
        let rows = parse_metrics_csv("model,MAE,run_id\nxgb,1.25,r-42\n").unwrap();
        assert_eq!(rows[0].metric(MetricKey::Mae), Some(1.25));
        assert_eq!(rows[0].len(), 3);
    }
}
