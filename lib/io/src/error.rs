use oxrdfio::RdfParseError;
use std::io;

/// An error raised while reading triples from a source.
///
/// Source-level failures are fatal to the pass: whatever an aggregation
/// sink accumulated up to the failure point remains, but is not guaranteed
/// to be complete.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Error from the OS I/O layer or the decompressor.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The input is not valid RDF in the expected format.
    #[error(transparent)]
    Parse(#[from] RdfParseError),
    /// The consumer thread of a merge died before draining the queue.
    #[error("the merge writer thread panicked")]
    MergeWriter,
}
