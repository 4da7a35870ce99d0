// SPDX-License-Identifier: MIT

//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging.
///
/// `LOG_FORMAT=json` selects flattened JSON output (log-collector friendly);
/// anything else uses the compact human-readable format. `RUST_LOG` refines
/// the default `training_tracker=debug,info` filter.
pub fn init() {
    let filter = EnvFilter::from_default_env()
        .add_directive("training_tracker=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        let format = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true);
        tracing_subscriber::registry().with(filter).with(format).init();
    } else {
        let format = tracing_subscriber::fmt::layer().compact().with_target(false);
        tracing_subscriber::registry().with(filter).with(format).init();
    }
}
