//! Video sinks.
//!
//! A [`VideoServer`] hands out one named [`VideoSink`] per graph; the
//! overlay worker is the only producer pushing into it. Publishing frames to
//! viewers is the server's business. Two servers ship with the crate: an
//! in-process [`ChannelServer`] and a [`NullServer`] that drops every frame.

use crate::framebuffer::Framebuffer;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::time::Instant;

/// Name, geometry and rate of a published source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInfo {
    /// Source name (the graph title).
    pub name: String,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frame rate.
    pub fps: u32,
}

/// Destination for frames of one source.
pub trait VideoSink: Send {
    /// Publish a frame. Frames match the source dimensions.
    fn push(&mut self, frame: &Framebuffer);

    /// Description of this source.
    fn info(&self) -> &SourceInfo;
}

/// Factory for named video sources.
pub trait VideoServer {
    /// Create a source of fixed dimensions and rate.
    fn create_source(&self, name: &str, width: u32, height: u32, fps: u32) -> Box<dyn VideoSink>;
}

// ============================================================================
// Channel
// ============================================================================

/// A frame as received by a channel viewer.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Source the frame was pushed to.
    pub source: String,
    /// Per-source sequence number, starting at 0.
    pub sequence: u64,
    /// When the frame was pushed.
    pub captured_at: Instant,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Packed RGB bytes.
    pub rgb: Vec<u8>,
}

/// Publishes pushed frames on a bounded mpsc channel.
///
/// At most `capacity` frames wait for the viewer. A push into a full queue
/// drops that frame, so an idle viewer never makes the backlog grow; the
/// dropped frame still consumes a sequence number.
///
/// ```
/// use livegraph::framebuffer::Framebuffer;
/// use livegraph::output::{ChannelServer, VideoServer};
///
/// let (server, frames) = ChannelServer::new();
/// let mut sink = server.create_source("demo", 4, 4, 10);
/// sink.push(&Framebuffer::new(4, 4).unwrap());
///
/// let frame = frames.recv().unwrap();
/// assert_eq!(frame.source, "demo");
/// assert_eq!(frame.rgb.len(), 4 * 4 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelServer {
    tx: SyncSender<Frame>,
}

impl ChannelServer {
    /// Frames queued for the viewer by [`ChannelServer::new`].
    pub const DEFAULT_CAPACITY: usize = 8;

    /// Create a server and the receiving end its sinks publish to, queueing
    /// up to [`Self::DEFAULT_CAPACITY`] frames.
    #[must_use]
    pub fn new() -> (Self, Receiver<Frame>) {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Like [`new`](Self::new) with an explicit queue bound (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> (Self, Receiver<Frame>) {
        let (tx, rx) = mpsc::sync_channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl VideoServer for ChannelServer {
    fn create_source(&self, name: &str, width: u32, height: u32, fps: u32) -> Box<dyn VideoSink> {
        Box::new(ChannelSink {
            info: SourceInfo { name: name.to_string(), width, height, fps },
            tx: self.tx.clone(),
            sequence: 0,
        })
    }
}

/// Sink half of a [`ChannelServer`].
#[derive(Debug)]
pub struct ChannelSink {
    info: SourceInfo,
    tx: SyncSender<Frame>,
    sequence: u64,
}

impl VideoSink for ChannelSink {
    fn push(&mut self, frame: &Framebuffer) {
        let frame = Frame {
            source: self.info.name.clone(),
            sequence: self.sequence,
            captured_at: Instant::now(),
            width: frame.width(),
            height: frame.height(),
            rgb: frame.to_rgb_bytes(),
        };
        self.sequence += 1;

        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(frame)) => {
                log::trace!("queue for '{}' full; dropped frame {}", self.info.name, frame.sequence);
            }
            Err(TrySendError::Disconnected(_)) => {
                log::trace!("no receiver for '{}'", self.info.name);
            }
        }
    }

    fn info(&self) -> &SourceInfo {
        &self.info
    }
}

// ============================================================================
// Null
// ============================================================================

/// Server whose sinks discard every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullServer;

impl VideoServer for NullServer {
    fn create_source(&self, name: &str, width: u32, height: u32, fps: u32) -> Box<dyn VideoSink> {
        Box::new(NullSink { info: SourceInfo { name: name.to_string(), width, height, fps } })
    }
}

/// Sink that discards frames.
#[derive(Debug)]
pub struct NullSink {
    info: SourceInfo,
}

impl VideoSink for NullSink {
    fn push(&mut self, _frame: &Framebuffer) {}

    fn info(&self) -> &SourceInfo {
        &self.info
    }
}
