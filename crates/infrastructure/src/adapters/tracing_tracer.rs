//! Trace spans on top of `tracing`
//!
//! Each trace span opens a `tracing` span carrying its name and resource.
//! Tags are buffered while the span is open and emitted as one event when it
//! closes, so they reach both log output and the OpenTelemetry layer.

use application::ports::{SpanPort, TracerPort};
use tracing::{Level, Span, field};

/// `TracerPort` implementation that opens `tracing` spans
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracer;

impl TracerPort for TracingTracer {
    fn start_span(&self, name: &'static str, resource: &str) -> Box<dyn SpanPort> {
        let span = tracing::info_span!(
            "trace_span",
            otel.name = name,
            resource = resource,
            otel.status_code = field::Empty,
        );
        Box::new(TracingSpan {
            name,
            span,
            tags: Vec::new(),
            error: false,
        })
    }
}

struct TracingSpan {
    name: &'static str,
    span: Span,
    tags: Vec<(&'static str, String)>,
    error: bool,
}

impl SpanPort for TracingSpan {
    fn set_tag(&mut self, key: &'static str, value: String) {
        if let Some(slot) = self.tags.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.tags.push((key, value));
        }
    }

    fn set_error(&mut self, error: bool) {
        self.error = error;
    }
}

impl Drop for TracingSpan {
    fn drop(&mut self) {
        if self.error {
            self.span.record("otel.status_code", "ERROR");
            tracing::event!(
                parent: &self.span,
                Level::WARN,
                span = self.name,
                tags = ?self.tags,
                error = true,
                "Span finished with error"
            );
        } else {
            tracing::event!(
                parent: &self.span,
                Level::DEBUG,
                span = self.name,
                tags = ?self.tags,
                "Span finished"
            );
        }
    }
}
