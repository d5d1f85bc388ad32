use std::fmt;

use serde_json::Value;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::parse::parse_metrics_csv;
use crate::record::{MetricKey, MetricsRecord};
use crate::source::MetricsSource;
use crate::state::{PanelState, SlotId, PLACEHOLDER};

/// Why a load attempt produced no record.
#[derive(Debug)]
pub enum LoadError {
    /// The document could not be retrieved: transport error, non-success
    /// status, or unreadable file.
    Retrieval(anyhow::Error),
    /// The document text could not be interpreted as tabular data.
    Parse(anyhow::Error),
}

impl LoadError {
    pub fn domain(&self) -> Domain {
        match self {
            LoadError::Retrieval(_) => Domain::Fetch,
            LoadError::Parse(_) => Domain::Parse,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Retrieval(err) => write!(f, "retrieval failed: {}", err),
            LoadError::Parse(err) => write!(f, "parse failed: {}", err),
        }
    }
}

impl std::error::Error for LoadError {}

/// Fetch and parse the metrics document, yielding its first data row.
///
/// `Ok(None)` means the document parsed but held no data rows.
pub async fn try_load(
    source: &dyn MetricsSource,
    path: &str,
) -> Result<Option<MetricsRecord>, LoadError> {
    let text = source.fetch_text(path).await.map_err(LoadError::Retrieval)?;
    let mut records = parse_metrics_csv(&text).map_err(LoadError::Parse)?;
    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(records.swap_remove(0)))
}

/// Write one record into every display slot: present metrics formatted by
/// their rule, absent metrics as the placeholder. Overwrites all slots, so
/// repeated loads are last-write-wins.
pub fn render(record: &MetricsRecord, panel: &mut PanelState) {
    for slot in SlotId::ALL {
        let key = slot.metric();
        let text = record
            .metric(key)
            .map(|v| key.format(v))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        panel.set(slot, text);
    }
}

/// One load attempt, fully tolerant: any failure degrades to placeholder
/// backfill of blank slots and nothing propagates to the caller.
pub async fn load_and_render(source: &dyn MetricsSource, path: &str, panel: &mut PanelState) {
    match try_load(source, path).await {
        Ok(Some(record)) => {
            render(&record, panel);
            let resolved: Vec<Value> = MetricKey::ALL
                .iter()
                .filter(|key| record.metric(**key).is_some())
                .map(|key| v_str(key.as_str()))
                .collect();
            log(
                Level::Info,
                Domain::Render,
                "metrics_rendered",
                obj(&[
                    ("path", v_str(path)),
                    ("fields", v_num(record.len() as f64)),
                    ("resolved", Value::Array(resolved)),
                ]),
            );
        }
        Ok(None) => {
            // Same recovery as a failure, logged as a warning: a panel with
            // nothing to show still must not leave slots blank.
            let filled = panel.backfill_placeholders();
            log(
                Level::Warn,
                Domain::Parse,
                "no_data_rows",
                obj(&[
                    ("path", v_str(path)),
                    ("msg", v_str("metrics csv contained no data rows")),
                    ("slots_backfilled", v_num(filled as f64)),
                ]),
            );
        }
        Err(err) => {
            let filled = panel.backfill_placeholders();
            log(
                Level::Error,
                err.domain(),
                "load_failed",
                obj(&[
                    ("path", v_str(path)),
                    ("msg", v_str(&err.to_string())),
                    ("slots_backfilled", v_num(filled as f64)),
                ]),
            );
        }
    }
}
