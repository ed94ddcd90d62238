//! Spans for feed runs and the spec files they visit.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{field, info_span, Span};

/// Span covering one feed generation run over `input`.
pub fn run_span(input: &Path) -> Span {
    info_span!("feed", input = %input.display())
}

/// Span covering the load of a single spec file.
///
/// The `error` field stays empty unless [`record_error`] is called inside it.
pub fn spec_span(path: &Path) -> Span {
    info_span!("spec", path = %path.display(), error = field::Empty)
}

/// Attach `error` to the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", field::display(error));
}

/// Wall-clock timer reported at debug level when finished.
pub struct Timer {
    started: Instant,
    label: &'static str,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            started: Instant::now(),
            label,
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();
        tracing::debug!(label = self.label, elapsed_ms = elapsed.as_millis() as u64, "finished");
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(out.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_events_carry_span_context() {
        let output = capture(|| {
            let run = run_span(Path::new("notifications"));
            let _run = run.enter();
            let spec = spec_span(Path::new("notifications/spring-sale.yml"));
            let _spec = spec.enter();
            tracing::warn!("Failed to load");
        });

        assert!(output.contains("input=notifications"));
        assert!(output.contains("path=notifications/spring-sale.yml"));
        assert!(output.contains("Failed to load"));
    }

    #[test]
    fn test_record_error_fills_field() {
        let output = capture(|| {
            let spec = spec_span(Path::new("notifications/gone.yml"));
            let _spec = spec.enter();
            record_error(&io::Error::new(io::ErrorKind::NotFound, "no such file"));
            tracing::info!("after");
        });

        assert!(output.contains("error=no such file"));
    }

    #[test]
    fn test_timer_measures() {
        let timer = Timer::start("sleep");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
