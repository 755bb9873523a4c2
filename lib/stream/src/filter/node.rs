use rdf_sieve_model::{Term, TermRef};

/// A boolean test over a single node of a triple.
///
/// Implementations follow a shared inversion scheme: an internal check is
/// evaluated and, when it holds, a configured `return_value` is produced,
/// otherwise its inverse. A filter and its logical negation thus share one
/// implementation. An absent node (`None`) short-circuits to a separately
/// configured value.
pub trait NodeFilter {
    /// Tests the given node. `None` stands for an absent node reference.
    fn matches(&self, node: Option<TermRef<'_>>) -> bool;
}

/// Resolves an internal check result against the configured return value.
fn resolve(check: bool, return_value: bool) -> bool {
    if check {
        return_value
    } else {
        !return_value
    }
}

/// Holds when the tested node equals a configured example node.
pub struct EqualityNodeFilter {
    example: Term,
    return_value: bool,
    absent_value: bool,
}

impl EqualityNodeFilter {
    /// Creates a filter that holds for nodes equal to `example`.
    pub fn new(example: impl Into<Term>) -> Self {
        Self::with_return_value(example, true)
    }

    /// Creates a filter that evaluates to `return_value` for nodes equal to
    /// `example` and to `!return_value` otherwise. Absent nodes evaluate to
    /// `false`.
    pub fn with_return_value(example: impl Into<Term>, return_value: bool) -> Self {
        Self {
            example: example.into(),
            return_value,
            absent_value: false,
        }
    }

    /// Overrides the value produced for an absent node.
    pub fn with_absent_value(mut self, absent_value: bool) -> Self {
        self.absent_value = absent_value;
        self
    }
}

impl NodeFilter for EqualityNodeFilter {
    fn matches(&self, node: Option<TermRef<'_>>) -> bool {
        match node {
            Some(node) => resolve(self.example.as_ref() == node, self.return_value),
            None => self.absent_value,
        }
    }
}

/// Holds when the tested node is an IRI starting with one of the configured
/// namespace prefixes.
///
/// The namespace test is a plain string-prefix check, no IRI normalization
/// is performed. Non-IRI nodes (and absent nodes) evaluate to a separately
/// configurable value, `!return_value` by default.
pub struct NamespaceNodeFilter {
    namespaces: Vec<String>,
    return_value: bool,
    non_iri_value: bool,
}

impl NamespaceNodeFilter {
    /// Creates a filter that holds for IRIs within one of `namespaces`.
    pub fn new(namespaces: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::with_return_value(namespaces, true)
    }

    /// Creates a filter that evaluates to `return_value` for IRIs within one
    /// of `namespaces` and to `!return_value` for all other IRIs as well as
    /// non-IRI nodes.
    pub fn with_return_value(
        namespaces: impl IntoIterator<Item = impl Into<String>>,
        return_value: bool,
    ) -> Self {
        Self {
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            return_value,
            non_iri_value: !return_value,
        }
    }

    /// Overrides the value produced for non-IRI and absent nodes.
    pub fn with_non_iri_value(mut self, non_iri_value: bool) -> Self {
        self.non_iri_value = non_iri_value;
        self
    }
}

impl NodeFilter for NamespaceNodeFilter {
    fn matches(&self, node: Option<TermRef<'_>>) -> bool {
        match node {
            Some(TermRef::NamedNode(node)) => {
                let iri = node.as_str();
                let in_namespace = self.namespaces.iter().any(|ns| iri.starts_with(ns));
                resolve(in_namespace, self.return_value)
            }
            _ => self.non_iri_value,
        }
    }
}
