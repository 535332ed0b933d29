//! Charter - headless market chart dashboard runner.
//!
//! Loads a CSV or JSON dataset, renders it through the dashboard into
//! recording widgets and prints what each panel drew.
//!
//! Usage: charter <data.csv|data.json> [options]

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use charter_config::Config;
use charter_data::loader_for_path;
use charter_indicators::PanelKind;
use charter_ta::ChartType;
use charter_ui::{
    Dashboard, DashboardReport, DashboardState, HeadlessFactory, Layout, RenderOutcome,
    WidgetOptions,
};

/// Width of every container in the headless layout.
const LAYOUT_WIDTH: u32 = 1280;

/// Command-line options. Anything not given falls back to the config file.
#[derive(Debug, Default, PartialEq)]
struct Args {
    data_path: PathBuf,
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    chart_type: Option<ChartType>,
    brick_size: Option<f64>,
    sr_depth: Option<usize>,
    panels: Option<Vec<PanelKind>>,
    no_levels: bool,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <data.csv|data.json> [options]\n\
         Options:\n  \
           --chart <candlestick|heikin-ashi|renko>  Main chart type\n  \
           --brick <N>       Renko brick size in price units\n  \
           --depth <N>       Support/resistance window half-width\n  \
           --symbol <S>      Symbol used for per-symbol settings\n  \
           --panels <a,b>    Indicator panels (volume, macd, oscillators, volatility)\n  \
           --no-levels       Hide support/resistance levels\n  \
           --config <path>   Config file (default: ./config.toml, then user config dir)"
    )
}

fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map(String::as_str).unwrap_or("charter");
    let Some(data_path) = args.get(1).filter(|a| !a.starts_with("--")) else {
        bail!("{}", usage(program));
    };

    let mut parsed = Args {
        data_path: PathBuf::from(data_path),
        ..Default::default()
    };

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--no-levels" {
            parsed.no_levels = true;
            i += 1;
            continue;
        }

        let value = args
            .get(i + 1)
            .with_context(|| format!("{flag} needs a value"))?;
        match flag {
            "--chart" => parsed.chart_type = Some(value.parse()?),
            "--brick" => {
                parsed.brick_size = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid brick size: {value}"))?,
                )
            }
            "--depth" => {
                parsed.sr_depth = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid depth: {value}"))?,
                )
            }
            "--symbol" => parsed.symbol = Some(value.clone()),
            "--config" => parsed.config_path = Some(PathBuf::from(value)),
            "--panels" => {
                let panels = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::parse)
                    .collect::<Result<Vec<PanelKind>, _>>()?;
                parsed.panels = Some(panels);
            }
            other => bail!("unknown option: {other}\n{}", usage(program)),
        }
        i += 2;
    }

    Ok(parsed)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::load_default()),
    }
}

/// Startup selection from config, with command-line overrides applied.
fn dashboard_state(config: &Config, args: &Args) -> DashboardState {
    let symbol = args
        .symbol
        .as_deref()
        .unwrap_or(&config.general.default_symbol);
    let mut state = DashboardState::from_config(config, symbol);

    if let Some(chart_type) = args.chart_type {
        state.chart_type = chart_type;
    }
    if let Some(brick_size) = args.brick_size {
        state.renko.brick_size = brick_size;
    }
    if let Some(depth) = args.sr_depth {
        state.sr.depth = depth;
    }
    if let Some(panels) = &args.panels {
        state.panels = panels.iter().copied().collect();
    }
    if args.no_levels {
        state.show_levels = false;
    }
    state
}

/// Load the dataset and render it once into headless widgets.
fn render(args: &Args) -> Result<(Dashboard<HeadlessFactory>, DashboardReport)> {
    let config = load_config(args.config_path.as_deref())?;
    let state = dashboard_state(&config, args);
    log::info!(
        "Chart {} (brick {}, depth {}), panels: {:?}",
        state.chart_type,
        state.renko.brick_size,
        state.sr.depth,
        state.panels
    );

    let data = loader_for_path(&args.data_path)?
        .load()
        .with_context(|| format!("failed to load {}", args.data_path.display()))?;
    if data.is_empty() {
        log::warn!("{} contains no candles", args.data_path.display());
    }

    let layout = Layout::stacked(LAYOUT_WIDTH, &config.widget, state.panels.iter().copied());
    let mut dashboard = Dashboard::new(
        HeadlessFactory::new(),
        WidgetOptions::from_config(&config.widget),
        state,
    );
    let report = dashboard.render(&data.candles, &data.indicators, &layout)?;
    Ok((dashboard, report))
}

fn describe(outcome: &RenderOutcome) -> String {
    match outcome {
        RenderOutcome::Rendered { series, .. } => format!("{series} series"),
        RenderOutcome::NoContainer => "no container".to_string(),
        RenderOutcome::NotApplicable => "no data".to_string(),
    }
}

fn print_summary(dashboard: &Dashboard<HeadlessFactory>, report: &DashboardReport) {
    let state = dashboard.state();
    println!("Chart: {} ({} bars)", state.chart_type, report.bars);

    if state.show_levels {
        println!("Levels: {}", report.levels.len());
        for level in &report.levels {
            println!("  {:<10} {:.4}", level.kind.label(), level.price);
        }
    }

    for (kind, outcome) in &report.panels {
        println!("Panel {:<12} {}", kind.label(), describe(outcome));
    }

    for widget in dashboard.factory().live_widgets() {
        println!(
            "Widget {} {}x{}: {}",
            widget.container,
            widget.width,
            widget.height,
            widget.series_titles().join(", ")
        );
    }
}

fn run() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args)?;
    let (mut dashboard, report) = render(&args)?;
    print_summary(&dashboard, &report);
    dashboard.teardown();

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&[
            "charter",
            "btc.csv",
            "--chart",
            "renko",
            "--brick",
            "25",
            "--panels",
            "macd, volume",
            "--no-levels",
        ]))
        .unwrap();

        assert_eq!(parsed.data_path, PathBuf::from("btc.csv"));
        assert_eq!(parsed.chart_type, Some(ChartType::Renko));
        assert_eq!(parsed.brick_size, Some(25.0));
        assert_eq!(parsed.panels, Some(vec![PanelKind::Macd, PanelKind::Volume]));
        assert!(parsed.no_levels);
        assert_eq!(parsed.sr_depth, None);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["charter"])).is_err());
        assert!(parse_args(&args(&["charter", "a.csv", "--depth"])).is_err());
        assert!(parse_args(&args(&["charter", "a.csv", "--depth", "deep"])).is_err());
        assert!(parse_args(&args(&["charter", "a.csv", "--chart", "line"])).is_err());
        assert!(parse_args(&args(&["charter", "a.csv", "--panels", "macd,foo"])).is_err());
        assert!(parse_args(&args(&["charter", "a.csv", "--frobnicate", "1"])).is_err());
    }

    #[test]
    fn test_overrides_beat_config() {
        let config = Config::default();
        let parsed = Args {
            symbol: Some("BTCUSDT".to_string()),
            sr_depth: Some(3),
            ..Default::default()
        };
        let state = dashboard_state(&config, &parsed);
        assert_eq!(state.renko.brick_size, 100.0);
        assert_eq!(state.sr.depth, 3);
        assert!(state.show_levels);

        let parsed = Args {
            symbol: Some("BTCUSDT".to_string()),
            brick_size: Some(5.0),
            no_levels: true,
            ..Default::default()
        };
        let state = dashboard_state(&config, &parsed);
        assert_eq!(state.renko.brick_size, 5.0);
        assert!(!state.show_levels);
    }

    #[test]
    fn test_render_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&data_path).unwrap();
        writeln!(file, "time,open,high,low,close,Volume,MACD,MACD_signal,MACD_hist").unwrap();
        for i in 0..12 {
            let high = if i == 6 { 110.0 } else { 101.0 + i as f64 * 0.01 };
            let low = 99.0 + i as f64 * 0.01;
            writeln!(
                file,
                "{},100,{},{},100.5,{},0.1,0.05,0.05",
                1_700_000_000 + i * 60,
                high,
                low,
                1000 + i
            )
            .unwrap();
        }
        drop(file);

        // keep the test independent of any config.toml in the working directory
        let config_path = dir.path().join("config.toml");
        Config::default().save(&config_path).unwrap();

        let parsed = Args {
            data_path,
            config_path: Some(config_path),
            sr_depth: Some(3),
            panels: Some(vec![PanelKind::Volume, PanelKind::Macd, PanelKind::Volatility]),
            ..Default::default()
        };
        let (mut dashboard, report) = render(&parsed).unwrap();

        assert_eq!(report.bars, 12);
        assert_eq!(report.levels.len(), 1);
        assert_eq!(report.levels[0].price, 110.0);
        assert_eq!(
            report.panels[&PanelKind::Macd],
            RenderOutcome::Rendered { series: 3, recreated: true }
        );
        assert_eq!(report.panels[&PanelKind::Volatility], RenderOutcome::NotApplicable);
        assert_eq!(dashboard.factory().live_widgets().len(), 3);

        dashboard.teardown();
        assert_eq!(dashboard.bus().listener_count(), 0);
    }
}
