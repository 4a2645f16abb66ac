use std::env;
use tracing_subscriber::{fmt, EnvFilter};

/// CLI 日志入口。RUST_LOG 始终优先，其次 AUTOFLOW_DEBUG 提升到 debug 级。
pub struct LoggingConfig;

impl LoggingConfig {
    pub fn init() {
        Self::init_with_filter(Self::default_filter());
    }

    /// Initialize with an explicit fallback filter (the `--verbose` path).
    /// A RUST_LOG setting still wins so users can override the CLI flag.
    pub fn init_with_filter(filter: &str) {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
        fmt()
            .with_env_filter(env_filter)
            .with_target(Self::is_debug())
            .try_init()
            .ok();
    }

    pub fn is_debug() -> bool {
        env::var("AUTOFLOW_DEBUG").is_ok()
    }

    fn default_filter() -> &'static str {
        if Self::is_debug() {
            "autoflow=debug,info"
        } else {
            "autoflow=info,warn"
        }
    }
}
