//! Live graphs: a static background plus a streamed tracked-point overlay.
//!
//! A [`GraphInstance`] is built once per title by [`create_graph`]. Building
//! validates every input and composes the background synchronously, so a bad
//! configuration never reaches the worker. [`GraphInstance::start`] spawns the
//! overlay worker; [`GraphInstance::update_tracked`] publishes new points to
//! it; [`GraphInstance::stop`] (or dropping the instance) ends the stream.
//!
//! # Example
//!
//! ```
//! use livegraph::curve::PolynomialFit;
//! use livegraph::graph::{create_graph, OverlayState};
//! use livegraph::output::NullServer;
//! use livegraph::series::DataSeries;
//! use livegraph::style::GraphStyle;
//!
//! let series = DataSeries::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]).unwrap();
//! let curve = PolynomialFit::fit(&series, 1).unwrap();
//!
//! let mut graph = create_graph("demo", GraphStyle::default(), series, &curve, &NullServer).unwrap();
//! assert_eq!(graph.state(), OverlayState::Idle);
//!
//! graph.start().unwrap();
//! graph.update_tracked(2.5, 5.0);
//! graph.stop();
//! assert_eq!(graph.state(), OverlayState::Stopped);
//! ```

mod background;
mod layout;
mod overlay;
mod tracked;

pub use background::{compose, curve_runs, padded_ranges, Background};
pub use layout::CanvasLayout;
pub use overlay::{format_value, OverlayRenderer, OverlayState, OverlayStats};
pub use tracked::{TrackedCell, TrackedPoint};

use crate::curve::CurveEvaluator;
use crate::error::{Result, Warning};
use crate::framebuffer::Framebuffer;
use crate::output::{SourceInfo, VideoServer, VideoSink};
use crate::render::Typeface;
use crate::scale::CoordinateMapper;
use crate::series::DataSeries;
use crate::style::GraphStyle;
use overlay::OverlayWorker;
use std::sync::Arc;

/// Build a graph with the default [`CanvasLayout`].
///
/// # Errors
///
/// Returns a configuration error if `style` is invalid, or an error if the
/// embedded typeface cannot be loaded. No graph exists on error.
pub fn create_graph<C: CurveEvaluator + ?Sized>(
    title: &str,
    style: GraphStyle,
    series: DataSeries,
    curve: &C,
    server: &dyn VideoServer,
) -> Result<GraphInstance> {
    GraphInstance::with_layout(title, style, series, curve, server, CanvasLayout::default())
}

/// A graph and its overlay worker.
pub struct GraphInstance {
    title: String,
    style: GraphStyle,
    series: DataSeries,
    background: Background,
    renderer: OverlayRenderer,
    tracked: Arc<TrackedCell>,
    stats: Arc<OverlayStats>,
    source: SourceInfo,
    sink: Option<Box<dyn VideoSink>>,
    worker: Option<OverlayWorker>,
    state: OverlayState,
}

impl GraphInstance {
    /// Build a graph with an explicit canvas layout.
    ///
    /// # Errors
    ///
    /// See [`create_graph`]; an invalid layout is also rejected.
    pub fn with_layout<C: CurveEvaluator + ?Sized>(
        title: &str,
        style: GraphStyle,
        series: DataSeries,
        curve: &C,
        server: &dyn VideoServer,
        layout: CanvasLayout,
    ) -> Result<Self> {
        let typeface = Typeface::embedded()?;
        let background = compose(&series, &style, curve, &layout, &typeface)?;
        let renderer = OverlayRenderer::new(&background, &style, layout, typeface);

        let sink = server.create_source(title, layout.width, layout.height, style.fps);
        let source = sink.info().clone();

        let mapper = background.mapper();
        log::info!(
            "created graph '{title}': x [{}, {}], y [{}, {}], {} fps",
            mapper.x_range().min,
            mapper.x_range().max,
            mapper.y_range().min,
            mapper.y_range().max,
            style.fps
        );

        Ok(Self {
            title: title.to_string(),
            style,
            series,
            background,
            renderer,
            tracked: Arc::new(TrackedCell::new()),
            stats: Arc::new(OverlayStats::default()),
            source,
            sink: Some(sink),
            worker: None,
            state: OverlayState::Idle,
        })
    }

    /// Graph title, also the video source name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resolved style.
    #[must_use]
    pub const fn style(&self) -> &GraphStyle {
        &self.style
    }

    /// Data series drawn on the background.
    #[must_use]
    pub const fn series(&self) -> &DataSeries {
        &self.series
    }

    /// The static background canvas.
    #[must_use]
    pub fn background(&self) -> &Framebuffer {
        self.background.canvas()
    }

    /// Data-to-pixel mapping of the canvas.
    #[must_use]
    pub const fn mapper(&self) -> &CoordinateMapper {
        self.background.mapper()
    }

    /// Frame the overlay would show for the current tracked point.
    #[must_use]
    pub fn snapshot(&self) -> Framebuffer {
        match self.tracked.load() {
            Some(point) => self.renderer.render(point),
            None => self.background().clone(),
        }
    }

    /// Publish a newly evaluated point. Never blocks on the worker.
    pub fn update_tracked(&self, x: f64, y: f64) {
        self.tracked.store(TrackedPoint::new(x, y));
    }

    /// Most recently published point.
    #[must_use]
    pub fn tracked(&self) -> Option<TrackedPoint> {
        self.tracked.load()
    }

    /// Worker counters.
    #[must_use]
    pub fn stats(&self) -> &OverlayStats {
        &self.stats
    }

    /// Current lifecycle state.
    ///
    /// A worker thread that is gone without a stop request reports `Stopped`.
    /// Panicking redraws and pushes do not end the worker; see
    /// [`OverlayStats::faults`].
    #[must_use]
    pub fn state(&self) -> OverlayState {
        match self.state {
            OverlayState::Running if !self.stats.is_running() => OverlayState::Stopped,
            state => state,
        }
    }

    /// Start streaming.
    ///
    /// Returns `Ok(Some(Warning::AlreadyStarted))` without side effects if
    /// the graph was started before.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::WorkerSpawn`] if the worker thread cannot be
    /// created; the graph is then stopped.
    pub fn start(&mut self) -> Result<Option<Warning>> {
        let Some(sink) = self.sink.take() else {
            let warning = Warning::AlreadyStarted { title: self.title.clone() };
            warning.emit();
            return Ok(Some(warning));
        };

        let spawned = OverlayWorker::spawn(
            &self.title,
            self.renderer.clone(),
            Arc::clone(&self.tracked),
            sink,
            self.style.frame_interval(),
            Arc::clone(&self.stats),
        );

        match spawned {
            Ok(worker) => {
                self.worker = Some(worker);
                self.state = OverlayState::Running;
                Ok(None)
            }
            Err(e) => {
                self.state = OverlayState::Stopped;
                Err(e)
            }
        }
    }

    /// Stop streaming and release the sink. Blocks until the worker has
    /// exited; no frame is pushed afterwards. Idempotent.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
        self.sink = None;
        if self.state != OverlayState::Stopped {
            log::debug!("graph '{}' stopped", self.title);
        }
        self.state = OverlayState::Stopped;
    }

    /// The published video source while the graph is streaming.
    ///
    /// Before [`start`](Self::start) this reports
    /// [`Warning::UnstartedAccess`] and returns `None`.
    #[must_use]
    pub fn video_source(&self) -> Option<&SourceInfo> {
        match self.state() {
            OverlayState::Running => Some(&self.source),
            OverlayState::Idle => {
                Warning::UnstartedAccess { title: Some(self.title.clone()) }.emit();
                None
            }
            OverlayState::Stopped => None,
        }
    }
}

impl std::fmt::Debug for GraphInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphInstance")
            .field("title", &self.title)
            .field("state", &self.state())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Drop for GraphInstance {
    fn drop(&mut self) {
        self.stop();
    }
}
