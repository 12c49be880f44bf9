use crate::merge::Record;

/// The only thing workers send to the aggregator.
#[derive(Debug)]
pub(crate) enum SourceMessage {
    Record(Record),

    /// The source at this index reached the end of its input.
    Closed(usize),
}
