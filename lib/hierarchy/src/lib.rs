//! Class-hierarchy aggregation over streamed RDF graphs.
//!
//! A streaming pass collects adjacency maps — `rdfs:subClassOf` edges, or
//! `rdfs:domain`/`rdfs:range` declarations — through the collector sinks
//! of [`rdf_sieve_stream`]. A later, non-streaming phase computes the
//! transitive closure of the hierarchy in place ([`propagate`]), tolerant
//! of cycles in malformed input. The closed maps feed the injectors that
//! synthesize `rdf:type` triples during a second streaming pass, and can
//! be persisted as JSON between the two passes.

mod collect;
mod inject;
mod propagate;
mod serialize;

pub use collect::{
    class_hierarchy_sink, domain_range_sink, shared_class_map, ClassMap, SharedClassMap,
};
pub use inject::{DomainRangeClassInjector, SuperClassInjector};
pub use propagate::propagate;
pub use serialize::{
    read_class_map, read_domain_range, write_class_map, write_domain_range, PersistError,
};
