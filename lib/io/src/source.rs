use crate::error::SourceError;
use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use oxrdfio::{RdfFormat, RdfParser};
use rdf_sieve_model::triple_from_quad;
use rdf_sieve_stream::TripleSink;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// A file-backed triple source.
///
/// The file may be gzip- or bzip2-compressed; decompression is transparent
/// and selected by the file extension. The RDF format is guessed from the
/// remaining extension and defaults to N-Triples. Quads in the input are
/// normalized to triples by dropping the graph component. Sources are
/// lazy, finite and non-restartable: every pass opens the file anew.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Option<RdfFormat>,
    lenient: bool,
}

impl FileSource {
    /// Creates a source over the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            lenient: false,
        }
    }

    /// Overrides the guessed RDF format.
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Logs and skips malformed input instead of aborting the pass.
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// The path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The RDF format this source parses.
    pub fn format(&self) -> RdfFormat {
        self.format.unwrap_or_else(|| guess_format(&self.path))
    }

    fn open(&self) -> Result<Box<dyn Read>, SourceError> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(match extension(&self.path) {
            Some("gz") => Box::new(MultiGzDecoder::new(reader)),
            Some("bz2") => Box::new(MultiBzDecoder::new(reader)),
            _ => Box::new(reader),
        })
    }

    /// Streams all triples of the file into `sink`, without touching the
    /// sink's lifecycle. Returns the number of streamed triples.
    ///
    /// Most callers want [`run`] or [`run_all`] instead, which wrap a whole
    /// pass with `start` and `finish`.
    pub fn stream_into<S: TripleSink>(&self, sink: &mut S) -> Result<u64, SourceError> {
        let parser = RdfParser::from_format(self.format());
        let mut count = 0;
        for quad in parser.for_reader(self.open()?) {
            match quad {
                Ok(quad) => {
                    let triple = triple_from_quad(quad);
                    sink.triple(&triple);
                    count += 1;
                }
                Err(error) => {
                    if self.lenient {
                        tracing::warn!("skipping malformed input in {:?}: {error}", self.path);
                    } else {
                        return Err(error.into());
                    }
                }
            }
        }
        Ok(count)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(OsStr::to_str)
}

/// Guesses the RDF format from the file extension, looking through a
/// trailing compression extension. Unknown extensions fall back to
/// N-Triples, the format of the large dumps this toolkit targets.
fn guess_format(path: &Path) -> RdfFormat {
    let path = match extension(path) {
        Some("gz" | "bz2") => Path::new(path.file_stem().unwrap_or_default()),
        _ => path,
    };
    extension(path)
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::NTriples)
}

/// Drives one full pass: `start`, every triple of `source`, `finish`.
///
/// Returns the number of streamed triples. On a source error the pass is
/// aborted and `finish` is not called.
pub fn run<S: TripleSink>(source: &FileSource, sink: &mut S) -> Result<u64, SourceError> {
    sink.start();
    let count = source.stream_into(sink)?;
    sink.finish();
    Ok(count)
}

/// Drives one full pass over several sources in the given order.
///
/// The sink sees a single lifecycle: one `start`, all triples of every
/// source, one `finish`.
pub fn run_all<S: TripleSink>(sources: &[FileSource], sink: &mut S) -> Result<u64, SourceError> {
    sink.start();
    let mut count = 0;
    for source in sources {
        tracing::info!("streaming {:?}", source.path());
        count += source.stream_into(sink)?;
    }
    sink.finish();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::NamedTempFile;
    use rdf_sieve_stream::CountingSink;

    const EXAMPLE_NT: &str = "<http://example.org/e1> <http://example.org/p1> <http://example.org/e2> .\n\
         <http://example.org/e2> <http://example.org/p1> \"test\" .\n";

    #[test]
    fn test_streams_n_triples_file() {
        let file = NamedTempFile::new("input.nt").unwrap();
        file.write_str(EXAMPLE_NT).unwrap();
        let mut sink = CountingSink::new();
        let count = run(&FileSource::new(file.path()), &mut sink).unwrap();
        assert_eq!(count, 2);
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_malformed_input_aborts_unless_lenient() {
        let file = NamedTempFile::new("input.nt").unwrap();
        file.write_str("this is not RDF\n").unwrap();
        let mut sink = CountingSink::new();
        assert!(run(&FileSource::new(file.path()), &mut sink).is_err());

        let mut sink = CountingSink::new();
        let count = run(&FileSource::new(file.path()).lenient(), &mut sink).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_format_guessing_sees_through_compression() {
        assert_eq!(
            FileSource::new("dump.ttl.bz2").format(),
            RdfFormat::Turtle
        );
        assert_eq!(FileSource::new("dump.nt.gz").format(), RdfFormat::NTriples);
        assert_eq!(FileSource::new("dump.unknown").format(), RdfFormat::NTriples);
    }

    #[test]
    fn test_run_all_wraps_every_source_in_one_lifecycle() {
        let first = NamedTempFile::new("first.nt").unwrap();
        first.write_str(EXAMPLE_NT).unwrap();
        let second = NamedTempFile::new("second.nt").unwrap();
        second.write_str(EXAMPLE_NT).unwrap();

        struct LifecycleCounter {
            started: u32,
            finished: u32,
            triples: u32,
        }
        impl TripleSink for LifecycleCounter {
            fn start(&mut self) {
                self.started += 1;
            }
            fn triple(&mut self, _triple: &rdf_sieve_model::Triple) {
                self.triples += 1;
            }
            fn finish(&mut self) {
                self.finished += 1;
            }
        }

        let mut sink = LifecycleCounter {
            started: 0,
            finished: 0,
            triples: 0,
        };
        let sources = [
            FileSource::new(first.path()),
            FileSource::new(second.path()),
        ];
        run_all(&sources, &mut sink).unwrap();
        assert_eq!(sink.started, 1);
        assert_eq!(sink.finished, 1);
        assert_eq!(sink.triples, 4);
    }
}
