//! The RDF data model used throughout the rdf-sieve workspace.
//!
//! This crate is a thin facade over [`oxrdf`]: nodes are [`Term`]s (IRI,
//! blank node, or literal), a [`Triple`] is exactly three of them, and a
//! [`Quad`] additionally names a graph. All values are immutable once
//! constructed and compare structurally. Sources that produce quads are
//! normalized to triples with [`triple_from_quad`], dropping the graph
//! component.

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, GraphNameRef, IriParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef, Subject,
    SubjectRef, Term, TermParseError, TermRef, Triple, TripleRef,
};

/// Vocabulary constants (`rdf:`, `rdfs:`, `xsd:`) as borrowed named nodes.
pub use oxrdf::vocab;

/// Normalizes a [`Quad`] to a [`Triple`] by discarding its graph component.
#[inline]
pub fn triple_from_quad(quad: Quad) -> Triple {
    let Quad {
        subject,
        predicate,
        object,
        ..
    } = quad;
    Triple {
        subject,
        predicate,
        object,
    }
}

/// Returns the subject-position view of a term, if the term may appear in
/// subject position (i.e. it is not a literal).
#[inline]
pub fn term_as_subject(term: &Term) -> Option<Subject> {
    match term {
        Term::NamedNode(node) => Some(Subject::NamedNode(node.clone())),
        Term::BlankNode(node) => Some(Subject::BlankNode(node.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_from_quad_drops_graph() {
        let ex = NamedNode::new("http://example.org/e").unwrap();
        let graph = NamedNode::new("http://example.org/g").unwrap();
        let quad = Quad::new(ex.clone(), ex.clone(), ex.clone(), graph);
        let triple = triple_from_quad(quad);
        assert_eq!(triple, Triple::new(ex.clone(), ex.clone(), ex));
    }

    #[test]
    fn test_term_as_subject_rejects_literals() {
        let iri = Term::from(NamedNode::new("http://example.org/e").unwrap());
        assert!(term_as_subject(&iri).is_some());
        let literal = Term::from(Literal::new_simple_literal("test"));
        assert!(term_as_subject(&literal).is_none());
    }
}
