//! Sources, sinks and drivers connecting pipelines to the filesystem.
//!
//! A [`FileSource`] opens an (optionally gzip- or bzip2-compressed) RDF
//! file, parses it with [`oxrdfio`] and pushes its triples into a
//! [`TripleSink`](rdf_sieve_stream::TripleSink) DAG. The [`run`] and
//! [`run_all`] drivers wrap a whole pass in exactly one `start`/`finish`
//! lifecycle. [`merge`] combines several sources into one sink through a
//! bounded hand-off queue and a dedicated consumer thread — the only point
//! of genuine concurrency in the toolkit.

mod error;
mod merge;
mod source;
mod writer;

pub use error::SourceError;
pub use merge::merge;
pub use source::{run, run_all, FileSource};
pub use writer::NTriplesWriterSink;

// Re-export the format type callers need to override guessing.
pub use oxrdfio::RdfFormat;
