use crate::error::SourceError;
use crate::source::FileSource;
use crossbeam_channel::Sender;
use rdf_sieve_model::Triple;
use rdf_sieve_stream::TripleSink;
use std::thread;

/// Forwards triples into the bounded hand-off queue of a merge.
struct ChannelSink {
    sender: Sender<Triple>,
    disconnected: bool,
}

impl TripleSink for ChannelSink {
    fn triple(&mut self, triple: &Triple) {
        if self.disconnected {
            return;
        }
        if self.sender.send(triple.clone()).is_err() {
            self.disconnected = true;
        }
    }
}

/// Merges several sources into one sink through a bounded queue.
///
/// The sources are streamed in order on the calling thread; a dedicated
/// consumer thread drains the queue and drives `sink` through a single
/// lifecycle. The queue capacity bounds the memory held in flight. All
/// triples of every source appear exactly once in the output; ordering
/// across sources is not guaranteed. The consumer thread is joined before
/// this function returns, also when a source fails mid-pass.
pub fn merge<S>(sources: &[FileSource], sink: S, capacity: usize) -> Result<S, SourceError>
where
    S: TripleSink + Send + 'static,
{
    let (sender, receiver) = crossbeam_channel::bounded::<Triple>(capacity.max(1));
    let consumer = thread::spawn(move || {
        let mut sink = sink;
        sink.start();
        for triple in receiver.iter() {
            sink.triple(&triple);
        }
        sink.finish();
        sink
    });

    let mut queue = ChannelSink {
        sender,
        disconnected: false,
    };
    let mut failure = None;
    for source in sources {
        tracing::info!("merging {:?}", source.path());
        if let Err(error) = source.stream_into(&mut queue) {
            failure = Some(error);
            break;
        }
    }
    // Dropping the sender ends the consumer's iteration.
    drop(queue);
    let sink = consumer.join().map_err(|_| SourceError::MergeWriter)?;
    match failure {
        Some(error) => Err(error),
        None => Ok(sink),
    }
}
