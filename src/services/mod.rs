pub mod drawing_log;
pub mod pacing;
pub mod sink;

pub use drawing_log::DrawingLog;
pub use pacing::{NoPacing, Pacer, PacingHandle, SleepPacer};
pub use sink::{ChannelSink, DisplayHandle, MemorySink, NullSink, Sink, SinkMessage};
