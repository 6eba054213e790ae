use sorteiaki_core::{ENV_SORTEIAKI_LOG_JSON, ENV_SORTEIAKI_LOG_LEVEL};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LogFlags {
    pub quiet: bool,
    pub verbose: u8,
    pub trace: bool,
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn filter_directive(flags: LogFlags) -> String {
    if flags.trace {
        return "trace".to_string();
    }
    if flags.verbose > 0 {
        return "debug".to_string();
    }
    if flags.quiet {
        return "error".to_string();
    }
    std::env::var(ENV_SORTEIAKI_LOG_LEVEL)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Installs the global subscriber. Logs always go to stderr.
pub(crate) fn init_tracing(flags: LogFlags) {
    let filter =
        EnvFilter::try_new(filter_directive(flags)).unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if env_bool(ENV_SORTEIAKI_LOG_JSON, false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::{filter_directive, LogFlags};

    #[test]
    fn flags_override_environment_levels() {
        let trace = LogFlags {
            trace: true,
            verbose: 2,
            quiet: true,
        };
        assert_eq!(filter_directive(trace), "trace");
        let verbose = LogFlags {
            verbose: 1,
            quiet: true,
            ..LogFlags::default()
        };
        assert_eq!(filter_directive(verbose), "debug");
        let quiet = LogFlags {
            quiet: true,
            ..LogFlags::default()
        };
        assert_eq!(filter_directive(quiet), "error");
    }
}
