use std::collections::HashMap;

use crate::record::MetricKey;

/// Fallback text shown in any slot whose value is unavailable.
pub const PLACEHOLDER: &str = "-";

#[derive(Clone, Debug)]
pub struct Config {
    /// Root location the dashboard reads from: a directory or an http(s) base URL.
    pub base: String,
    /// Path of the metrics CSV, relative to `base`.
    pub metrics_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            base: std::env::var("DASH_BASE").unwrap_or_else(|_| ".".to_string()),
            metrics_path: std::env::var("METRICS_PATH")
                .unwrap_or_else(|_| crate::probe::KNOWN_ARTIFACTS[0].to_string()),
        }
    }
}

/// A named display location bound to one metric and its formatting rule.
///
/// The string identifiers are an external contract shared with the
/// presentation layer; renaming them breaks the panel markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    ModelMae,
    ModelRmse,
    ModelR2,
    ModelsMae,
    ModelsRmse,
    ModelsR2,
    ModelsMape,
}

impl SlotId {
    /// Every slot a load attempt must leave non-blank.
    pub const ALL: [SlotId; 7] = [
        SlotId::ModelMae,
        SlotId::ModelRmse,
        SlotId::ModelR2,
        SlotId::ModelsMae,
        SlotId::ModelsRmse,
        SlotId::ModelsR2,
        SlotId::ModelsMape,
    ];

    /// The model-performance card.
    pub const PRIMARY: [SlotId; 3] = [SlotId::ModelMae, SlotId::ModelRmse, SlotId::ModelR2];

    /// The all-models comparison card. MAPE appears only here.
    pub const ALL_MODELS: [SlotId; 4] = [
        SlotId::ModelsMae,
        SlotId::ModelsRmse,
        SlotId::ModelsR2,
        SlotId::ModelsMape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::ModelMae => "model-mae",
            SlotId::ModelRmse => "model-rmse",
            SlotId::ModelR2 => "model-r2",
            SlotId::ModelsMae => "models-mae",
            SlotId::ModelsRmse => "models-rmse",
            SlotId::ModelsR2 => "models-r2",
            SlotId::ModelsMape => "models-mape",
        }
    }

    pub fn metric(&self) -> MetricKey {
        match self {
            SlotId::ModelMae | SlotId::ModelsMae => MetricKey::Mae,
            SlotId::ModelRmse | SlotId::ModelsRmse => MetricKey::Rmse,
            SlotId::ModelR2 | SlotId::ModelsR2 => MetricKey::R2,
            SlotId::ModelsMape => MetricKey::Mape,
        }
    }
}

/// Owned panel state: the current text of every display slot.
///
/// Slots start blank. After any load attempt completes, every slot holds
/// either a formatted value or [`PLACEHOLDER`] — writes are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    slots: HashMap<SlotId, String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: SlotId, text: String) {
        self.slots.insert(slot, text);
    }

    pub fn text(&self, slot: SlotId) -> &str {
        self.slots.get(&slot).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self, slot: SlotId) -> bool {
        self.text(slot).is_empty()
    }

    /// Uniform failure recovery: write the placeholder into every blank slot,
    /// leaving populated slots untouched. Returns how many were filled.
    pub fn backfill_placeholders(&mut self) -> usize {
        let mut filled = 0;
        for slot in SlotId::ALL {
            if self.is_blank(slot) {
                self.set(slot, PLACEHOLDER.to_string());
                filled += 1;
            }
        }
        filled
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("model performance\n");
        for slot in SlotId::PRIMARY {
            out.push_str(&format!("  {:<12} {}\n", slot.as_str(), self.text(slot)));
        }
        out.push_str("all models\n");
        for slot in SlotId::ALL_MODELS {
            out.push_str(&format!("  {:<12} {}\n", slot.as_str(), self.text(slot)));
        }
        out
    }
}
