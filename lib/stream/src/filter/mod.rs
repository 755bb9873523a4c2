mod node;

pub use node::{EqualityNodeFilter, NamespaceNodeFilter, NodeFilter};

use crate::sink::{NoopSink, TripleSink};
use rdf_sieve_model::Triple;
use rustc_hash::FxHashSet;

/// A boolean test over a whole triple.
///
/// Any `Fn(&Triple) -> bool` closure qualifies; [`SlotPredicate`] and
/// [`PropertyPredicate`] provide the named combinators pipelines are built
/// from.
pub trait TriplePredicate {
    /// Tests the given triple.
    fn matches(&self, triple: &Triple) -> bool;
}

impl<F: Fn(&Triple) -> bool> TriplePredicate for F {
    fn matches(&self, triple: &Triple) -> bool {
        self(triple)
    }
}

/// Combines up to three node filters, one per triple slot.
///
/// An absent slot filter acts as a wildcard and accepts any node; the
/// present filters are AND-combined.
pub struct SlotPredicate {
    subject: Option<Box<dyn NodeFilter>>,
    predicate: Option<Box<dyn NodeFilter>>,
    object: Option<Box<dyn NodeFilter>>,
}

impl SlotPredicate {
    /// Creates a slot-wise predicate from up to three node filters.
    pub fn new(
        subject: Option<Box<dyn NodeFilter>>,
        predicate: Option<Box<dyn NodeFilter>>,
        object: Option<Box<dyn NodeFilter>>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl TriplePredicate for SlotPredicate {
    fn matches(&self, triple: &Triple) -> bool {
        self.subject
            .as_ref()
            .map_or(true, |f| f.matches(Some(triple.subject.as_ref().into())))
            && self
                .predicate
                .as_ref()
                .map_or(true, |f| f.matches(Some(triple.predicate.as_ref().into())))
            && self
                .object
                .as_ref()
                .map_or(true, |f| f.matches(Some(triple.object.as_ref())))
    }
}

/// Accepts triples whose predicate IRI is in a configured set.
pub struct PropertyPredicate {
    properties: FxHashSet<String>,
}

impl PropertyPredicate {
    /// Creates a predicate accepting the given property IRIs.
    pub fn new(properties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl TriplePredicate for PropertyPredicate {
    fn matches(&self, triple: &Triple) -> bool {
        self.properties.contains(triple.predicate.as_str())
    }
}

/// The conditional-routing primitive of the pipeline.
///
/// Each incoming triple is tested against the predicate and forwarded to
/// exactly one of the two downstream sinks: the accepted sink when the
/// predicate holds, the rejected sink otherwise. Without an explicit
/// rejected sink, non-matching triples are dropped.
pub struct FilterSink<P, A, R = NoopSink> {
    predicate: P,
    accepted: A,
    rejected: R,
}

impl<P: TriplePredicate, A: TripleSink> FilterSink<P, A> {
    /// Creates a filter that drops rejected triples.
    pub fn new(predicate: P, accepted: A) -> Self {
        Self {
            predicate,
            accepted,
            rejected: NoopSink,
        }
    }
}

impl<P: TriplePredicate, A: TripleSink, R: TripleSink> FilterSink<P, A, R> {
    /// Creates a filter that routes rejected triples into a second sink.
    pub fn with_rejected(predicate: P, accepted: A, rejected: R) -> Self {
        Self {
            predicate,
            accepted,
            rejected,
        }
    }

    /// Consumes the filter and returns the accepted and rejected sinks.
    pub fn into_parts(self) -> (A, R) {
        (self.accepted, self.rejected)
    }
}

impl<P: TriplePredicate, A: TripleSink, R: TripleSink> TripleSink for FilterSink<P, A, R> {
    fn start(&mut self) {
        self.accepted.start();
        self.rejected.start();
    }

    fn triple(&mut self, triple: &Triple) {
        if self.predicate.matches(triple) {
            self.accepted.triple(triple);
        } else {
            self.rejected.triple(triple);
        }
    }

    fn finish(&mut self) {
        self.accepted.finish();
        self.rejected.finish();
    }
}
