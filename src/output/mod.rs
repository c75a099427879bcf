//! Frame outputs: video sinks and PNG snapshots.

mod png_encoder;
mod sink;

pub use png_encoder::PngEncoder;
pub use sink::{ChannelServer, ChannelSink, Frame, NullServer, NullSink, SourceInfo, VideoServer, VideoSink};
