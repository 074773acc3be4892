use std::sync::Once;

use tracing_subscriber::{
    filter::FilterFn, fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt,
};

fn ours(metadata: &tracing::Metadata<'_>) -> bool {
    metadata.module_path().unwrap_or_default().starts_with("park_it")
}

/// Route this library's `tracing` output to logcat on Android and stderr
/// elsewhere. Later calls are no-ops.
#[uniffi::export]
pub fn init_logging() {
    static LOGGING_SETUP: Once = Once::new();

    LOGGING_SETUP.call_once(|| {
        #[cfg(target_os = "android")]
        {
            use tracing_logcat::{LogcatMakeWriter, LogcatTag};

            let tag = LogcatTag::Fixed("ParkIt-Rust".to_owned());
            let writer = match LogcatMakeWriter::new(tag) {
                Ok(writer) => writer,
                Err(e) => {
                    eprintln!("failed to initialize logcat writer: {e}");
                    return;
                }
            };
            let layer = tracing_subscriber::fmt::layer()
                .event_format(Format::default().with_level(false).without_time())
                .with_writer(writer)
                .with_ansi(false);
            let _ = tracing_subscriber::registry()
                .with(layer)
                .with(FilterFn::new(ours))
                .try_init();
        }

        #[cfg(not(target_os = "android"))]
        {
            let layer = tracing_subscriber::fmt::layer()
                .event_format(Format::default().without_time())
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(layer)
                .with(FilterFn::new(ours))
                .try_init();
        }
    });
}
