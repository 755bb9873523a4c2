use oxrdfio::{RdfFormat, RdfSerializer, WriterQuadSerializer};
use rdf_sieve_model::Triple;
use rdf_sieve_stream::TripleSink;
use std::io::{self, Write};

/// A terminal sink serializing every received triple as N-Triples.
///
/// [`TripleSink`] is an infallible push interface, so write failures cannot
/// surface where they happen: the sink latches the first error, drops all
/// further triples, and reports the failure when the caller hands the sink
/// back through [`close`](NTriplesWriterSink::close). `finish` flushes the
/// serializer and is safe to call a second time.
pub struct NTriplesWriterSink<W: Write> {
    serializer: Option<WriterQuadSerializer<W>>,
    error: Option<io::Error>,
}

impl<W: Write> NTriplesWriterSink<W> {
    /// Creates a sink writing N-Triples to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            serializer: Some(RdfSerializer::from_format(RdfFormat::NTriples).for_writer(writer)),
            error: None,
        }
    }

    /// Finishes the serializer if necessary and reports the first write
    /// error of the whole pass, if any.
    pub fn close(mut self) -> io::Result<()> {
        self.finish_serializer();
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn finish_serializer(&mut self) {
        if let Some(serializer) = self.serializer.take() {
            match serializer.finish() {
                Ok(mut writer) => {
                    if let Err(error) = writer.flush() {
                        self.record(error);
                    }
                }
                Err(error) => self.record(error),
            }
        }
    }

    fn record(&mut self, error: io::Error) {
        if self.error.is_none() {
            tracing::error!("writing triples failed: {error}");
            self.error = Some(error);
        }
    }
}

impl<W: Write> TripleSink for NTriplesWriterSink<W> {
    fn triple(&mut self, triple: &Triple) {
        if self.error.is_some() {
            return;
        }
        if let Some(serializer) = &mut self.serializer {
            if let Err(error) = serializer.serialize_triple(triple) {
                self.record(error);
            }
        }
    }

    fn finish(&mut self) {
        self.finish_serializer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_sieve_model::NamedNode;

    #[test]
    fn test_writes_n_triples() {
        let mut buffer = Vec::new();
        let mut sink = NTriplesWriterSink::new(&mut buffer);
        let node = NamedNode::new("http://example.org/e").unwrap();
        sink.start();
        sink.triple(&Triple::new(node.clone(), node.clone(), node));
        sink.finish();
        sink.close().unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "<http://example.org/e> <http://example.org/e> <http://example.org/e> .\n"
        );
    }

    #[test]
    fn test_close_reports_write_failures() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = NTriplesWriterSink::new(FailingWriter);
        let node = NamedNode::new("http://example.org/e").unwrap();
        sink.start();
        sink.triple(&Triple::new(node.clone(), node.clone(), node));
        sink.finish();
        assert!(sink.close().is_err());
    }
}
