//! Live overlay: the tracked-point marker drawn over the background and the
//! worker that streams frames to a video sink.
//!
//! Each cycle the worker reads the tracked point; when its `x` changed since
//! the previous redraw the background is cloned and the marker and value label
//! are drawn on the copy. The current frame is then pushed and the worker
//! waits out the rest of the frame interval on its stop channel, so a stop
//! request interrupts the wait.
//!
//! A panic inside a redraw or a push is contained to its cycle: it is counted
//! in [`OverlayStats::faults`] and the worker carries on with the next cycle.
//! Only a stop request ends the loop.

use super::background::Background;
use super::layout::CanvasLayout;
use super::tracked::{TrackedCell, TrackedPoint};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::VideoSink;
use crate::render::{draw_vline, Orientation, TextMetrics, Typeface};
use crate::scale::CoordinateMapper;
use crate::style::GraphStyle;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Lifecycle of a graph's overlay worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// Created, not started.
    #[default]
    Idle,
    /// Worker is streaming frames.
    Running,
    /// Worker has exited. Terminal.
    Stopped,
}

/// Render a value with at most 4 fractional digits, truncating rather than
/// rounding.
///
/// The value is written in plain decimal notation, never with an exponent, so
/// any magnitude below `1e-4` comes out as `0.0000` (or `-0.0000` when
/// negative).
///
/// ```
/// use livegraph::graph::format_value;
///
/// assert_eq!(format_value(31.6), "31.6");
/// assert_eq!(format_value(-0.571_428_571), "-0.5714");
/// assert_eq!(format_value(2.0), "2");
/// assert_eq!(format_value(0.000_012), "0.0000");
/// assert_eq!(format_value(-0.000_012), "-0.0000");
/// ```
#[must_use]
pub fn format_value(value: f64) -> String {
    let text = value.to_string();
    match text.find('.') {
        Some(dot) if text.len() - dot - 1 > 4 => text[..dot + 5].to_string(),
        _ => text,
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Draws the tracked-point marker and value label over the background.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    background: Arc<Framebuffer>,
    mapper: CoordinateMapper,
    color: Rgb,
    layout: CanvasLayout,
    typeface: Typeface,
}

impl OverlayRenderer {
    /// Create a renderer over a composed background.
    #[must_use]
    pub fn new(
        background: &Background,
        style: &GraphStyle,
        layout: CanvasLayout,
        typeface: Typeface,
    ) -> Self {
        Self {
            background: background.shared(),
            mapper: *background.mapper(),
            color: style.checker,
            layout,
            typeface,
        }
    }

    /// The unmodified background.
    #[must_use]
    pub fn background(&self) -> Arc<Framebuffer> {
        Arc::clone(&self.background)
    }

    /// Render a fresh frame for `point`.
    ///
    /// `x` is clamped into the padded x range; the marker spans the full
    /// padded y range. A non-finite `x` yields the plain background.
    #[must_use]
    pub fn render(&self, point: TrackedPoint) -> Framebuffer {
        let mut frame = Framebuffer::clone(&self.background);
        if !point.x.is_finite() {
            return frame;
        }

        let x = self.mapper.x_range().clamp(point.x);
        let y_range = self.mapper.y_range();
        let top = self.mapper.to_pixel(x, y_range.max);
        let bottom = self.mapper.to_pixel(x, y_range.min);
        let (marker_x, top_y) = top.round();
        let (_, bottom_y) = bottom.round();
        draw_vline(&mut frame, marker_x, top_y, bottom_y, self.color);

        let label = format!("y = {}", format_value(point.y));
        let scale = self.layout.label_scale;
        let width = self.typeface.text_width(&label, scale);
        let gap = self.layout.value_label_gap;

        // Flip to the left of the marker when the label would leave the canvas.
        let mut label_x = top.x + gap;
        if top.x >= f64::from(self.layout.width) - gap - width {
            label_x -= width + 2.0 * gap;
        }

        self.typeface.draw(
            &mut frame,
            &label,
            (label_x, self.layout.value_label_y),
            scale,
            self.color,
            Orientation::Horizontal,
        );
        frame
    }
}

// ============================================================================
// Worker
// ============================================================================

/// Faults after the first are logged once every this many.
const FAULT_LOG_EVERY: u64 = 100;

/// Counters published by the overlay worker.
#[derive(Debug, Default)]
pub struct OverlayStats {
    frames: AtomicU64,
    redraws: AtomicU64,
    faults: AtomicU64,
    running: AtomicBool,
}

impl OverlayStats {
    /// Frames pushed to the sink so far.
    #[must_use]
    pub fn frames_pushed(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Marker redraws so far.
    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws.load(Ordering::Acquire)
    }

    /// Redraws and pushes that panicked and were skipped.
    #[must_use]
    pub fn faults(&self) -> u64 {
        self.faults.load(Ordering::Acquire)
    }

    /// Whether the worker loop is still alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Count a contained fault. Returns whether it should be logged.
    fn record_fault(&self) -> bool {
        let previous = self.faults.fetch_add(1, Ordering::AcqRel);
        previous % FAULT_LOG_EVERY == 0
    }
}

/// Handle to a running overlay worker thread.
#[derive(Debug)]
pub(crate) struct OverlayWorker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl OverlayWorker {
    /// Spawn the worker. It owns `sink` until it exits.
    pub(crate) fn spawn(
        title: &str,
        renderer: OverlayRenderer,
        tracked: Arc<TrackedCell>,
        sink: Box<dyn VideoSink>,
        interval: Duration,
        stats: Arc<OverlayStats>,
    ) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let cycle = Cycle { renderer, tracked, sink, interval, stats: Arc::clone(&stats) };

        stats.running.store(true, Ordering::Release);
        let handle = thread::Builder::new()
            .name(format!("overlay-{title}"))
            .spawn(move || cycle.run(&stop_rx))
            .map_err(|e| {
                stats.running.store(false, Ordering::Release);
                Error::WorkerSpawn(e.to_string())
            })?;

        Ok(Self { stop_tx, handle })
    }

    /// Signal the worker and wait for it to exit. No frame is pushed after
    /// this returns.
    pub(crate) fn stop(self) {
        // A send error means the worker already exited.
        let _ = self.stop_tx.send(());
        if self.handle.join().is_err() {
            log::error!("overlay worker panicked during shutdown");
        }
    }
}

/// State owned by the worker thread.
struct Cycle {
    renderer: OverlayRenderer,
    tracked: Arc<TrackedCell>,
    sink: Box<dyn VideoSink>,
    interval: Duration,
    stats: Arc<OverlayStats>,
}

impl Cycle {
    fn run(mut self, stop_rx: &Receiver<()>) {
        let name = self.sink.info().name.clone();
        log::debug!("overlay worker for '{name}' started ({:?} per frame)", self.interval);

        let mut frame = self.renderer.background();
        let mut last_x: Option<u64> = None;

        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }

            let started = Instant::now();

            if let Some(point) = self.tracked.load() {
                let bits = point.x.to_bits();
                if last_x != Some(bits) {
                    last_x = Some(bits);
                    let renderer = &self.renderer;
                    match catch_unwind(AssertUnwindSafe(|| renderer.render(point))) {
                        Ok(rendered) => {
                            log::trace!("'{name}' marker redrawn at x = {}", point.x);
                            frame = Arc::new(rendered);
                            self.stats.redraws.fetch_add(1, Ordering::AcqRel);
                        }
                        Err(_) => {
                            if self.stats.record_fault() {
                                log::error!(
                                    "'{name}' overlay redraw failed; keeping previous frame ({} faults)",
                                    self.stats.faults()
                                );
                            }
                        }
                    }
                }
            }

            let sink = &mut self.sink;
            if catch_unwind(AssertUnwindSafe(|| sink.push(&frame))).is_ok() {
                self.stats.frames.fetch_add(1, Ordering::AcqRel);
            } else if self.stats.record_fault() {
                log::error!(
                    "video sink for '{name}' failed; frame dropped ({} faults)",
                    self.stats.faults()
                );
            }

            let remaining = self.interval.saturating_sub(started.elapsed());
            match stop_rx.recv_timeout(remaining) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.stats.running.store(false, Ordering::Release);
        log::debug!("overlay worker for '{name}' stopped");
    }
}
