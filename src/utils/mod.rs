use std::sync::Once;

const DEFAULT_DIRECTIVE: &str = "rent_core=info";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `directive` overrides the default `rent_core=info` filter, typically with
/// [`Config::log_filter`](crate::config::Config::log_filter), and is combined
/// with whatever `RUST_LOG` holds.
pub fn init_tracing(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let directive: Directive = directive
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| {
                DEFAULT_DIRECTIVE
                    .parse()
                    .expect("default tracing directive is valid")
            });
        let filter = EnvFilter::from_default_env().add_directive(directive);

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
