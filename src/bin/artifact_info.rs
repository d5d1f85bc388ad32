use forecast_explorer::logging::ts_now;
use forecast_explorer::probe::{ArtifactInfo, KNOWN_ARTIFACTS};
use forecast_explorer::source::SourceKind;
use forecast_explorer::state::Config;
use serde_json::json;
use std::env;

#[tokio::main]
async fn main() {
    let cfg = Config::from_env();
    let source = match SourceKind::from_base(&cfg.base).build(&cfg) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("bad source base {}: {}", cfg.base, err);
            std::process::exit(1);
        }
    };

    let args: Vec<String> = env::args().skip(1).collect();
    let paths: Vec<String> = if args.is_empty() {
        KNOWN_ARTIFACTS.iter().map(|s| s.to_string()).collect()
    } else {
        args
    };

    let mut infos: Vec<ArtifactInfo> = Vec::with_capacity(paths.len());
    let mut missing = 0;
    for path in &paths {
        match source.probe_len(path).await {
            Ok(len) => infos.push(ArtifactInfo::new(path, Some(len))),
            Err(err) => {
                eprintln!("probe failed: {} ({})", path, err);
                missing += 1;
                infos.push(ArtifactInfo::new(path, None));
            }
        }
    }

    let payload = json!({
        "base": cfg.base,
        "probed_at": ts_now(),
        "artifacts": infos,
    });
    println!("{}", serde_json::to_string_pretty(&payload).unwrap());

    if missing > 0 {
        std::process::exit(2);
    }
}
