//! Push-based streaming operators over RDF triples.
//!
//! A pipeline is an arbitrary DAG of [`TripleSink`]s, wired bottom-up:
//! downstream sinks are constructed first and handed to the operators that
//! feed them. An external source then drives the outermost sink through
//! `start`, one `triple` call per input triple, and `finish`. Each operator
//! forwards, drops, rewrites, or records — nothing is buffered, so graphs
//! of arbitrary size stream through in one pass.
//!
//! The operator set mirrors what large-dump preprocessing needs:
//! [`FilterSink`] for conditional routing, [`MapSink`]/[`FlatMapSink`] for
//! rewriting, [`CollectorSink`]/[`GroupBySink`] for building in-memory
//! aggregates consumed by a later phase, and [`SamplingFilter`] for
//! probabilistic selection.

mod collect;
mod filter;
mod map;
mod progress;
mod sampling;
mod sink;

pub use collect::{CollectorSink, GroupBySink};
pub use filter::{
    EqualityNodeFilter, FilterSink, NamespaceNodeFilter, NodeFilter, PropertyPredicate,
    SlotPredicate, TriplePredicate,
};
pub use map::{FlatMapSink, MapSink};
pub use progress::{LogProgressMonitor, NoopProgressMonitor, ProgressMonitor, ProgressSink};
pub use sampling::{InvalidProbability, SamplingFilter};
pub use sink::{
    CountingSink, FnSink, NoopSink, SharedSink, SuppressLifecycle, TeeSink, TripleSink,
};
