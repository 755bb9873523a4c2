use crate::sink::TripleSink;
use rdf_sieve_model::Triple;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::hash::Hash;
use std::iter;
use std::marker::PhantomData;
use std::rc::Rc;

/// A terminal sink that extracts one value per triple into a caller-owned
/// collection.
///
/// The caller keeps a handle on the shared collection and reads it back
/// after the pass. Extraction functions return `None` for triples they
/// cannot handle (e.g. a blank node where an IRI was expected); such
/// triples are skipped instead of failing the pass. Collectors are
/// single-writer: the shared handle is not `Send`.
pub struct CollectorSink<F, T, C> {
    extract: F,
    collected: Rc<RefCell<C>>,
    _value: PhantomData<fn() -> T>,
}

impl<F, T, C> CollectorSink<F, T, C>
where
    F: Fn(&Triple) -> Option<T>,
    C: Extend<T>,
{
    /// Creates a collector appending extracted values to `collected`.
    pub fn new(extract: F, collected: Rc<RefCell<C>>) -> Self {
        Self {
            extract,
            collected,
            _value: PhantomData,
        }
    }
}

impl<F, T, C> TripleSink for CollectorSink<F, T, C>
where
    F: Fn(&Triple) -> Option<T>,
    C: Extend<T>,
{
    fn triple(&mut self, triple: &Triple) {
        if let Some(value) = (self.extract)(triple) {
            self.collected.borrow_mut().extend(iter::once(value));
        }
    }
}

/// A terminal sink that groups one value per triple under a key extracted
/// from the same triple.
///
/// On the first occurrence of a key the per-key collection is created with
/// the caller-supplied factory. Key iteration order of the resulting map is
/// unspecified; value order within a group depends on the collection type.
/// Triples for which either extraction returns `None` are skipped.
pub struct GroupBySink<FK, FV, FC, K, V, C> {
    key: FK,
    value: FV,
    factory: FC,
    collected: Rc<RefCell<FxHashMap<K, C>>>,
    _value: PhantomData<fn() -> V>,
}

impl<FK, FV, FC, K, V, C> GroupBySink<FK, FV, FC, K, V, C>
where
    FK: Fn(&Triple) -> Option<K>,
    FV: Fn(&Triple) -> Option<V>,
    FC: Fn() -> C,
    K: Eq + Hash,
    C: Extend<V>,
{
    /// Creates a group-by collector over the shared map `collected`.
    pub fn new(key: FK, value: FV, factory: FC, collected: Rc<RefCell<FxHashMap<K, C>>>) -> Self {
        Self {
            key,
            value,
            factory,
            collected,
            _value: PhantomData,
        }
    }
}

impl<FK, FV, FC, K, V, C> TripleSink for GroupBySink<FK, FV, FC, K, V, C>
where
    FK: Fn(&Triple) -> Option<K>,
    FV: Fn(&Triple) -> Option<V>,
    FC: Fn() -> C,
    K: Eq + Hash,
    C: Extend<V>,
{
    fn triple(&mut self, triple: &Triple) {
        let (Some(key), Some(value)) = ((self.key)(triple), (self.value)(triple)) else {
            return;
        };
        self.collected
            .borrow_mut()
            .entry(key)
            .or_insert_with(&self.factory)
            .extend(iter::once(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_sieve_model::vocab::rdfs;
    use rdf_sieve_model::{NamedNode, Subject, Term};
    use rustc_hash::FxHashSet;

    fn domain_triple(property: &str, class: &str) -> Triple {
        Triple::new(
            NamedNode::new(property).unwrap(),
            rdfs::DOMAIN.into_owned(),
            NamedNode::new(class).unwrap(),
        )
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

    fn set(values: &[&str]) -> FxHashSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn test_collector_appends_extracted_values() {
        let collected: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut sink = CollectorSink::new(subject_iri, Rc::clone(&collected));
        sink.start();
        sink.triple(&domain_triple("http://example.org/p1", "http://example.org/C1"));
        sink.triple(&domain_triple("http://example.org/p2", "http://example.org/C2"));
        sink.finish();
        assert_eq!(
            *collected.borrow(),
            vec!["http://example.org/p1".to_owned(), "http://example.org/p2".to_owned()]
        );
    }

    #[test]
    fn test_group_by_groups_values_under_shared_keys() {
        let collected: Rc<RefCell<FxHashMap<String, FxHashSet<String>>>> = Rc::default();
        let mut sink = GroupBySink::new(
            subject_iri,
            object_iri,
            FxHashSet::default,
            Rc::clone(&collected),
        );
        sink.start();
        sink.triple(&domain_triple("http://example.org/p1111", "http://example.org/C1111"));
        sink.triple(&domain_triple("http://example.org/p1223", "http://example.org/C1"));
        sink.triple(&domain_triple("http://example.org/p1223", "http://example.org/C2"));
        sink.finish();

        let collected = collected.borrow();
        assert_eq!(collected.len(), 2);
        assert_eq!(
            collected["http://example.org/p1111"],
            set(&["http://example.org/C1111"])
        );
        assert_eq!(
            collected["http://example.org/p1223"],
            set(&["http://example.org/C1", "http://example.org/C2"])
        );
    }

    #[test]
    fn test_group_by_skips_unextractable_triples() {
        let collected: Rc<RefCell<FxHashMap<String, Vec<String>>>> = Rc::default();
        let mut sink = GroupBySink::new(subject_iri, object_iri, Vec::new, Rc::clone(&collected));
        let literal_object = Triple::new(
            NamedNode::new("http://example.org/p1").unwrap(),
            rdfs::DOMAIN.into_owned(),
            Term::from(rdf_sieve_model::Literal::new_simple_literal("C1")),
        );
        sink.triple(&literal_object);
        assert!(collected.borrow().is_empty());
    }
}
