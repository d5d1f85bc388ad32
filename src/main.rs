use anyhow::Result;

use forecast_explorer::loader::load_and_render;
use forecast_explorer::logging::{log, obj, v_str, Domain, Level};
use forecast_explorer::probe::probe_artifacts;
use forecast_explorer::source::SourceKind;
use forecast_explorer::state::{Config, PanelState};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let source = SourceKind::from_base(&cfg.base).build(&cfg)?;

    log(
        Level::Info,
        Domain::System,
        "initialized",
        obj(&[
            ("base", v_str(&cfg.base)),
            ("path", v_str(&cfg.metrics_path)),
        ]),
    );

    let mut panel = PanelState::new();
    load_and_render(source.as_ref(), &cfg.metrics_path, &mut panel).await;
    probe_artifacts(source.as_ref()).await;

    print!("{}", panel.to_text());
    Ok(())
}
