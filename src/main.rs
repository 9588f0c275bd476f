pub mod auth;
pub mod config;
pub mod editor;
pub mod model;
pub mod render;
pub mod server;
pub mod site;
pub mod store;
pub mod upload;
pub mod util;

use crate::config::Flags;
use color_eyre::Report;
use structopt::StructOpt;

/// Log filter used when `RUST_LOG` is unset
#[cfg(debug_assertions)]
const DEFAULT_LOG_FILTER: &str = "warn,marquee_server=trace,tower_http=debug";
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_FILTER: &str = "warn,marquee_server=info";

#[tokio::main]
async fn main() -> Result<(), Report> {
    if std::env::var(env_logger::DEFAULT_FILTER_ENV).is_err() {
        std::env::set_var(env_logger::DEFAULT_FILTER_ENV, DEFAULT_LOG_FILTER);
    }
    env_logger::init();
    color_eyre::install()?;

    let flags = Flags::from_args();
    let cfg = flags.load_cfg().await?;

    server::run(cfg).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Metadata};

    fn enabled(target: &str, level: Level) -> bool {
        let filter = env_logger::filter::Builder::new()
            .parse(DEFAULT_LOG_FILTER)
            .build();
        filter.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_default_log_filter() {
        assert!(enabled("marquee_server::store", Level::Info));
        assert!(enabled("hyper", Level::Warn));
        assert!(!enabled("hyper", Level::Info));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_debug_filter_traces_requests() {
        assert!(enabled("marquee_server::server::api", Level::Trace));
        assert!(enabled("tower_http::trace::on_request", Level::Debug));
    }
}
