use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format per entrypoint: humans read the CLI, CloudWatch ingests the Lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// `RUST_LOG` wins; otherwise relay logs at info (debug when verbose).
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "submission_relay=debug,lambda=debug,warn"
    } else {
        "submission_relay=info,lambda=info,warn"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // 兩個 layer 只會啟用其中一個
    let compact = (format == LogFormat::Compact).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
    });
    // CloudWatch 自帶時間戳
    let json = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .without_time()
            .json()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .init();
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(LogFormat::Compact, verbose);
}

pub fn init_lambda_logger() {
    init_logger(LogFormat::Json, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
        assert!(default_directives(true).contains("submission_relay=debug"));
        assert!(default_directives(false).contains("submission_relay=info"));
    }
}
