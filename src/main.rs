use std::path::PathBuf;

use axis_scaler::{run_scaler, ScalerConfig};

fn usage() -> ! {
    eprintln!("usage: axis-scaler [--config <path>] [--remote <endpoint>]");
    std::process::exit(2);
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config_path: Option<PathBuf> = None;
    let mut remote: Option<String> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = Some(args.next().map(PathBuf::from).unwrap_or_else(|| usage()));
            }
            "--remote" => remote = Some(args.next().unwrap_or_else(|| usage())),
            "-h" | "--help" => usage(),
            other => {
                eprintln!("unknown argument: {other}");
                usage();
            }
        }
    }

    let loaded = match &config_path {
        Some(path) => ScalerConfig::load_from_path(path).map(Some),
        None => ScalerConfig::load_from_default_path(),
    };
    let mut cfg = match loaded {
        Ok(cfg) => cfg.unwrap_or_default(),
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            ScalerConfig::default()
        }
    };
    if remote.is_some() {
        cfg.service.endpoint = remote;
    }

    run_scaler(cfg)
}
