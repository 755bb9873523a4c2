use rdf_sieve_model::vocab::rdfs;
use rdf_sieve_model::{Subject, Term, Triple};
use rdf_sieve_stream::{FilterSink, GroupBySink, TripleSink};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::rc::Rc;

/// A collected adjacency map: class (or property) IRI to a set of IRIs.
pub type ClassMap = FxHashMap<String, FxHashSet<String>>;

/// A [`ClassMap`] shared between the caller and the collector sinks that
/// fill it during a streaming pass.
pub type SharedClassMap = Rc<RefCell<ClassMap>>;

/// Creates an empty shared class map.
pub fn shared_class_map() -> SharedClassMap {
    Rc::default()
}

fn subject_iri(triple: &Triple) -> Option<String> {
    match &triple.subject {
        Subject::NamedNode(node) => Some(node.as_str().to_owned()),
        _ => None,
    }
}

fn object_iri(triple: &Triple) -> Option<String> {
    match &triple.object {
        Term::NamedNode(node) => Some(node.as_str().to_owned()),
        _ => None,
    }
}

/// Builds the sink collecting the `rdfs:subClassOf` hierarchy.
///
/// Each `(c, rdfs:subClassOf, s)` triple records `s` as a directly declared
/// superclass of `c` in the shared map; every other triple is dropped.
/// Triples whose subject or object is not an IRI are skipped.
pub fn class_hierarchy_sink(hierarchy: SharedClassMap) -> impl TripleSink {
    let groups = GroupBySink::new(subject_iri, object_iri, FxHashSet::default, hierarchy);
    FilterSink::new(
        |t: &Triple| t.predicate.as_ref() == rdfs::SUB_CLASS_OF,
        groups,
    )
}

/// Builds the sink collecting `rdfs:domain` and `rdfs:range` declarations.
///
/// A two-stage cascade: `rdfs:domain` triples are grouped into `domains`,
/// the rejected remainder flows on into a second filter grouping
/// `rdfs:range` triples into `ranges`. Everything else is dropped.
pub fn domain_range_sink(domains: SharedClassMap, ranges: SharedClassMap) -> impl TripleSink {
    let range_stage = FilterSink::new(
        |t: &Triple| t.predicate.as_ref() == rdfs::RANGE,
        GroupBySink::new(subject_iri, object_iri, FxHashSet::default, ranges),
    );
    FilterSink::with_rejected(
        |t: &Triple| t.predicate.as_ref() == rdfs::DOMAIN,
        GroupBySink::new(subject_iri, object_iri, FxHashSet::default, domains),
        range_stage,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_sieve_model::NamedNode;

    fn triple(subject: &str, predicate: &str, object: &str) -> Triple {
        Triple::new(
            NamedNode::new(subject).unwrap(),
            NamedNode::new(predicate).unwrap(),
            NamedNode::new(object).unwrap(),
        )
    }

    fn set(values: &[&str]) -> FxHashSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_class_hierarchy_sink_collects_only_sub_class_of() {
        let hierarchy = shared_class_map();
        let mut sink = class_hierarchy_sink(Rc::clone(&hierarchy));
        sink.start();
        sink.triple(&triple(
            "http://example.org/class/11",
            rdfs::SUB_CLASS_OF.as_str(),
            "http://example.org/class/1",
        ));
        sink.triple(&triple(
            "http://example.org/class/12",
            rdfs::SUB_CLASS_OF.as_str(),
            "http://example.org/class/1",
        ));
        sink.triple(&triple(
            "http://example.org/class/12",
            rdfs::SUB_CLASS_OF.as_str(),
            "http://example.org/class/2",
        ));
        // Not a hierarchy edge, must be ignored.
        sink.triple(&triple(
            "http://example.org/e1",
            "http://example.org/p1",
            "http://example.org/class/1",
        ));
        sink.finish();
        drop(sink);

        let hierarchy = hierarchy.borrow();
        assert_eq!(hierarchy.len(), 2);
        assert_eq!(
            hierarchy["http://example.org/class/11"],
            set(&["http://example.org/class/1"])
        );
        assert_eq!(
            hierarchy["http://example.org/class/12"],
            set(&["http://example.org/class/1", "http://example.org/class/2"])
        );
    }

    #[test]
    fn test_domain_range_sink_routes_into_both_maps() {
        let domains = shared_class_map();
        let ranges = shared_class_map();
        let mut sink = domain_range_sink(Rc::clone(&domains), Rc::clone(&ranges));
        sink.start();
        sink.triple(&triple(
            "http://example.org/p1111",
            rdfs::DOMAIN.as_str(),
            "http://example.org/C1111",
        ));
        sink.triple(&triple(
            "http://example.org/p1223",
            rdfs::DOMAIN.as_str(),
            "http://example.org/C1",
        ));
        sink.triple(&triple(
            "http://example.org/p1223",
            rdfs::DOMAIN.as_str(),
            "http://example.org/C2",
        ));
        sink.triple(&triple(
            "http://example.org/p1223",
            rdfs::RANGE.as_str(),
            "http://example.org/C3",
        ));
        sink.finish();
        drop(sink);

        let domains = domains.borrow();
        assert_eq!(domains.len(), 2);
        assert_eq!(
            domains["http://example.org/p1111"],
            set(&["http://example.org/C1111"])
        );
        assert_eq!(
            domains["http://example.org/p1223"],
            set(&["http://example.org/C1", "http://example.org/C2"])
        );
        assert_eq!(
            ranges.borrow()["http://example.org/p1223"],
            set(&["http://example.org/C3"])
        );
    }
}
