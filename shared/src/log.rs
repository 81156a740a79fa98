use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the JSON subscriber over stdout for the whole process.
pub fn init() {
    subscriber(std::io::stdout).init();
}

/// Builds the JSON subscriber writing to `writer`.
///
/// CloudWatch stamps every line, so no timestamp is emitted.
pub fn subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_current_span(false)
        .with_span_list(false)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_line_number(true)
        .with_writer(writer)
        .finish()
}
