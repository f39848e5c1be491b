//! Tracing spans and timing.

use tracing::{info_span, Span};

/// Span for one access-guard check.
pub fn guard_span(path: &str) -> Span {
    info_span!("guard", path = %path)
}

/// Span for a backend API call.
pub fn api_span(operation: &str) -> Span {
    info_span!("api", op = %operation)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Instrument;

    #[tokio::test]
    async fn test_instrumented_future_runs() {
        let value = async { 41 + 1 }.instrument(api_span("login")).await;
        assert_eq!(value, 42);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("unit");
        timer.finish();
    }
}
