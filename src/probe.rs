use serde::Serialize;

use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::source::MetricsSource;
use crate::state::PLACEHOLDER;

/// Artifact paths the dashboard knows about, probed once at startup.
pub const KNOWN_ARTIFACTS: [&str; 2] = [
    "data/processed/xgb_baseline_gpu_metrics.csv",
    "data/processed/xgb_baseline_gpu_test_predictions.csv",
];

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub path: String,
    pub size_bytes: Option<u64>,
}

impl ArtifactInfo {
    pub fn new(path: &str, size_bytes: Option<u64>) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            name,
            path: path.to_string(),
            size_bytes,
        }
    }

    pub fn size_text(&self) -> String {
        match self.size_bytes {
            Some(n) => format_bytes(n),
            None => PLACEHOLDER.to_string(),
        }
    }
}

/// Best-effort existence/size check over the known artifacts.
///
/// Logged only; a missing artifact is a warning, never an error, and
/// nothing here touches the rendered panel.
pub async fn probe_artifacts(source: &dyn MetricsSource) -> Vec<ArtifactInfo> {
    let mut infos = Vec::with_capacity(KNOWN_ARTIFACTS.len());
    for path in KNOWN_ARTIFACTS {
        match source.probe_len(path).await {
            Ok(len) => {
                let info = ArtifactInfo::new(path, Some(len));
                log(
                    Level::Info,
                    Domain::Probe,
                    "artifact_found",
                    obj(&[
                        ("path", v_str(path)),
                        ("name", v_str(&info.name)),
                        ("size_bytes", v_num(len as f64)),
                        ("size", v_str(&info.size_text())),
                    ]),
                );
                infos.push(info);
            }
            Err(err) => {
                let info = ArtifactInfo::new(path, None);
                log(
                    Level::Warn,
                    Domain::Probe,
                    "artifact_unavailable",
                    obj(&[
                        ("path", v_str(path)),
                        ("name", v_str(&info.name)),
                        ("msg", v_str(&err.to_string())),
                    ]),
                );
                infos.push(info);
            }
        }
    }
    infos
}

/// Humanized byte count: base 1024, rounded to 2 decimals with trailing
/// zeros dropped. Zero reads as the placeholder.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return PLACEHOLDER.to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut exp = 0usize;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && exp < UNITS.len() - 1 {
        scaled /= 1024.0;
        exp += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}
