use crate::collect::ClassMap;
use rdf_sieve_model::vocab::rdf;
use rdf_sieve_model::{term_as_subject, NamedNode, Term, Triple};

/// Parses a stored class IRI back into a node, skipping invalid entries.
fn class_node(iri: &str) -> Option<NamedNode> {
    match NamedNode::new(iri) {
        Ok(node) => Some(node),
        Err(error) => {
            tracing::warn!("skipping invalid class IRI '{iri}': {error}");
            None
        }
    }
}

/// Expands triples with `rdf:type` assertions derived from the domain and
/// range declarations of their predicate.
///
/// For a triple `(s, p, o)` the expansion yields the triple itself, then
/// one `(s, rdf:type, d)` per domain class `d` of `p`, then — only when `o`
/// is not a literal — one `(o, rdf:type, r)` per range class `r`. A
/// predicate present in neither map passes through unchanged.
pub struct DomainRangeClassInjector {
    domains: ClassMap,
    ranges: ClassMap,
}

impl DomainRangeClassInjector {
    /// Creates an injector over the given domain and range declarations.
    pub fn new(domains: ClassMap, ranges: ClassMap) -> Self {
        Self { domains, ranges }
    }

    /// Expands one triple; see the type-level documentation.
    pub fn expand(&self, triple: &Triple) -> Vec<Triple> {
        let mut result = vec![triple.clone()];
        let predicate = triple.predicate.as_str();
        if let Some(classes) = self.domains.get(predicate) {
            for class in classes {
                if let Some(class) = class_node(class) {
                    result.push(Triple::new(
                        triple.subject.clone(),
                        rdf::TYPE.into_owned(),
                        class,
                    ));
                }
            }
        }
        if !matches!(triple.object, Term::Literal(_)) {
            if let (Some(classes), Some(object)) = (
                self.ranges.get(predicate),
                term_as_subject(&triple.object),
            ) {
                for class in classes {
                    if let Some(class) = class_node(class) {
                        result.push(Triple::new(object.clone(), rdf::TYPE.into_owned(), class));
                    }
                }
            }
        }
        result
    }
}

/// Widens statements over classes with the ancestors of their object.
///
/// For a triple whose object is an IRI with an entry in the propagated
/// hierarchy, one `(s, p, ancestor)` triple is produced per recorded
/// ancestor; the input triple itself is not re-emitted. Triples whose
/// object is unknown to the hierarchy expand to nothing. Intended to run
/// behind a filter that selects `rdf:type` statements, where it turns one
/// class assertion into assertions for every superclass.
pub struct SuperClassInjector {
    hierarchy: ClassMap,
}

impl SuperClassInjector {
    /// Creates an injector over a propagated class hierarchy.
    pub fn new(hierarchy: ClassMap) -> Self {
        Self { hierarchy }
    }

    /// Expands one triple; see the type-level documentation.
    pub fn expand(&self, triple: &Triple) -> Vec<Triple> {
        let Term::NamedNode(object) = &triple.object else {
            return Vec::new();
        };
        let Some(ancestors) = self.hierarchy.get(object.as_str()) else {
            return Vec::new();
        };
        ancestors
            .iter()
            .filter_map(|ancestor| class_node(ancestor))
            .map(|ancestor| {
                Triple::new(triple.subject.clone(), triple.predicate.clone(), ancestor)
            })
            .collect()
    }
}
