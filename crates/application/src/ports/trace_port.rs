//! Trace span port definition
//!
//! Spans wrap the downstream call and the fallback path. They are tagged
//! with key/value attributes and an error flag, and finish when dropped.

use std::fmt;

/// Factory for trace spans
pub trait TracerPort: Send + Sync + fmt::Debug {
    /// Open a span named `name` for `resource`
    fn start_span(&self, name: &'static str, resource: &str) -> Box<dyn SpanPort>;
}

/// An open trace span; finishing happens on drop
pub trait SpanPort: Send {
    /// Attach a key/value attribute
    fn set_tag(&mut self, key: &'static str, value: String);

    /// Flag the span as errored
    fn set_error(&mut self, error: bool);
}

/// Tracer that hands out [`NoopSpan`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl TracerPort for NoopTracer {
    fn start_span(&self, _name: &'static str, _resource: &str) -> Box<dyn SpanPort> {
        Box::new(NoopSpan)
    }
}

/// Span that ignores all attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

impl SpanPort for NoopSpan {
    fn set_tag(&mut self, _key: &'static str, _value: String) {}

    fn set_error(&mut self, _error: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_tracer_spans_accept_tags() {
        let tracer = NoopTracer;
        let mut span = tracer.start_span("db.query", "MockPostgres");
        span.set_tag("product.id", "1".to_string());
        span.set_error(true);
    }

    #[test]
    fn span_is_send() {
        fn assert_send<T: Send + ?Sized>() {}
        assert_send::<Box<dyn SpanPort>>();
    }
}
