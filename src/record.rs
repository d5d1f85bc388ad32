use std::collections::HashMap;

/// One metric of the evaluation panel.
///
/// Each key owns the ordered list of CSV headers it answers to and the
/// display rule applied when a value is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Mae,
    Rmse,
    R2,
    Mape,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [
        MetricKey::Mae,
        MetricKey::Rmse,
        MetricKey::R2,
        MetricKey::Mape,
    ];

    /// Candidate headers, tried in priority order. Exact matches win over
    /// the case-insensitive pass in [`MetricsRecord::metric`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            MetricKey::Mae => &["MAE", "mae"],
            MetricKey::Rmse => &["RMSE", "rmse"],
            MetricKey::R2 => &["R2", "r2", "R_squared"],
            MetricKey::Mape => &["MAPE", "mape"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Mae => "mae",
            MetricKey::Rmse => "rmse",
            MetricKey::R2 => "r2",
            MetricKey::Mape => "mape",
        }
    }

    /// Display rule for a present value: error metrics and R² as fixed
    /// 4-decimal strings, MAPE as value×100 with 2 decimals and a `%`.
    pub fn format(&self, value: f64) -> String {
        match self {
            MetricKey::Mape => format!("{:.2}%", value * 100.0),
            _ => format!("{:.4}", value),
        }
    }
}

/// A CSV cell after type coercion: numeric-looking text becomes a finite
/// number, empty text becomes absence, anything else stays text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            // NaN/inf parse but are not usable metric values; keep them
            // as text so they render as the placeholder, not "NaN".
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// One data row of the metrics CSV: header name mapped to coerced cell.
///
/// Only the first data row of a document ever reaches the renderer, and a
/// fresh record is parsed on every load.
#[derive(Debug, Clone, Default)]
pub struct MetricsRecord {
    cells: HashMap<String, CellValue>,
}

impl MetricsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: &str, raw: &str) {
        self.cells.insert(header.to_string(), CellValue::coerce(raw));
    }

    /// Numeric value for one metric, resolved through its alias list:
    /// exact header matches first, then one case-insensitive pass.
    ///
    /// A header that is present but holds no finite number counts as
    /// absent. Absence is never conflated with zero.
    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        for alias in key.aliases() {
            if let Some(v) = self.cells.get(*alias).and_then(CellValue::as_number) {
                return Some(v);
            }
        }
        for alias in key.aliases() {
            let found = self
                .cells
                .iter()
                .find(|(header, _)| header.eq_ignore_ascii_case(alias))
                .and_then(|(_, cell)| cell.as_number());
            if let Some(v) = found {
                return Some(v);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
