use crate::sink::TripleSink;
use rdf_sieve_model::Triple;
use std::time::Instant;

/// Observes the progress of a streaming pass.
///
/// Purely observational: monitors never affect what flows through the
/// pipeline.
pub trait ProgressMonitor {
    /// Called once before the first tick.
    fn start(&mut self) {}

    /// Reports `count` additional processed triples.
    fn tick(&mut self, count: u64);

    /// Called once after the pass completed.
    fn finish(&mut self) {}
}

/// A monitor that ignores all progress reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressMonitor;

impl ProgressMonitor for NoopProgressMonitor {
    fn tick(&mut self, _count: u64) {}
}

/// Logs progress through `tracing` every `step` triples.
pub struct LogProgressMonitor {
    label: String,
    step: u64,
    seen: u64,
    next_report: u64,
    started_at: Option<Instant>,
}

impl LogProgressMonitor {
    /// Creates a monitor logging under `label` every `step` triples.
    pub fn new(label: impl Into<String>, step: u64) -> Self {
        let step = step.max(1);
        Self {
            label: label.into(),
            step,
            seen: 0,
            next_report: step,
            started_at: None,
        }
    }

    fn rate_per_second(&self) -> u64 {
        let millis = self
            .started_at
            .map_or(0, |started| started.elapsed().as_millis())
            .max(1);
        u64::try_from(u128::from(self.seen) * 1000 / millis).unwrap_or(u64::MAX)
    }
}

impl ProgressMonitor for LogProgressMonitor {
    fn start(&mut self) {
        self.seen = 0;
        self.next_report = self.step;
        self.started_at = Some(Instant::now());
    }

    fn tick(&mut self, count: u64) {
        self.seen += count;
        if self.seen >= self.next_report {
            tracing::info!(
                "{}: {} ({} triples/s)",
                self.label,
                self.seen,
                self.rate_per_second()
            );
            self.next_report = (self.seen / self.step + 1) * self.step;
        }
    }

    fn finish(&mut self) {
        tracing::info!(
            "{}: finished after {} triples ({} triples/s)",
            self.label,
            self.seen,
            self.rate_per_second()
        );
    }
}

/// Decorates a sink with a progress monitor ticking once per triple.
pub struct ProgressSink<S, M> {
    inner: S,
    monitor: M,
}

impl<S: TripleSink, M: ProgressMonitor> ProgressSink<S, M> {
    /// Wraps `inner`, reporting its progress to `monitor`.
    pub fn new(inner: S, monitor: M) -> Self {
        Self { inner, monitor }
    }

    /// Returns the decorated sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TripleSink, M: ProgressMonitor> TripleSink for ProgressSink<S, M> {
    fn start(&mut self) {
        self.monitor.start();
        self.inner.start();
    }

    fn triple(&mut self, triple: &Triple) {
        self.monitor.tick(1);
        self.inner.triple(triple);
    }

    fn finish(&mut self) {
        self.inner.finish();
        self.monitor.finish();
    }
}
