use clap::Parser;

use dsi_dashboard::config::AppConfig;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::parse();
    if let Err(e) = dsi_dashboard::run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
