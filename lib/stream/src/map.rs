use crate::sink::TripleSink;
use rdf_sieve_model::Triple;

/// Rewrites each triple with a pure function and forwards the result.
///
/// The function must be effect-free; stateful accumulation belongs into the
/// collector sinks, not into mapping functions.
pub struct MapSink<F, S> {
    map: F,
    inner: S,
}

impl<F: Fn(&Triple) -> Triple, S: TripleSink> MapSink<F, S> {
    /// Creates a mapper forwarding rewritten triples to `inner`.
    pub fn new(map: F, inner: S) -> Self {
        Self { map, inner }
    }

    /// Returns the downstream sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<F: Fn(&Triple) -> Triple, S: TripleSink> TripleSink for MapSink<F, S> {
    fn start(&mut self) {
        self.inner.start();
    }

    fn triple(&mut self, triple: &Triple) {
        let mapped = (self.map)(triple);
        self.inner.triple(&mapped);
    }

    fn finish(&mut self) {
        self.inner.finish();
    }
}

/// Expands each triple into zero or more triples and forwards every one of
/// them, in the order produced, to a single downstream sink.
///
/// The expansion may synthesize triples over nodes that never appeared in
/// the input. Like [`MapSink`], the function must be effect-free.
pub struct FlatMapSink<F, S> {
    expand: F,
    inner: S,
}

impl<F: Fn(&Triple) -> Vec<Triple>, S: TripleSink> FlatMapSink<F, S> {
    /// Creates a flat-mapper forwarding expanded triples to `inner`.
    pub fn new(expand: F, inner: S) -> Self {
        Self { expand, inner }
    }

    /// Returns the downstream sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<F: Fn(&Triple) -> Vec<Triple>, S: TripleSink> TripleSink for FlatMapSink<F, S> {
    fn start(&mut self) {
        self.inner.start();
    }

    fn triple(&mut self, triple: &Triple) {
        for expanded in (self.expand)(triple) {
            self.inner.triple(&expanded);
        }
    }

    fn finish(&mut self) {
        self.inner.finish();
    }
}
