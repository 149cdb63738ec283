use crate::log::{
    log_msg::{FormattedRecord, LogMsg},
    sink_error::SinkError,
};

/// A destination for log records.
///
/// The logger formats each record once and hands every sink both the raw
/// record and the rendered line. Implementations serialize their own writes;
/// one record must never interleave with another inside a sink.
pub trait LogSink: Send + Sync {
    /// Short name used when reporting this sink's failures.
    fn name(&self) -> &'static str;

    fn log(&self, msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError>;

    fn flush(&self) -> Result<(), SinkError>;
}
