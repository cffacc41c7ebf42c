//! Showcase runtime
//!
//! [`ShowcaseApp`] owns the reactive graph, the animation scheduler and the
//! render state, and drives the mounted widgets through their triggers:
//!
//! 1. Triggers (`appear`, `tap`, timer fires) mutate widget state
//! 2. Widgets whose state changed rebuild their view
//! 3. The container view is diffed into the render state, starting
//!    transitions for every animated property that changed
//! 4. [`ShowcaseApp::advance`] ticks transitions and delivers timer fires
//! 5. [`ShowcaseApp::frame`] resolves, lays out and snapshots the result

use std::time::Duration;

use motif_animation::AnimationScheduler;
use motif_core::{ReactiveGraph, SharedReactiveGraph, Size};
use motif_layout::{compute_layout, render_svg, Element, RenderNode, RenderState};
use serde::Serialize;

use crate::error::{Result, ShowcaseError};
use crate::showcase::{ContentView, WidgetKind};
use crate::widget::{Widget, WidgetContext, WidgetSummary};

/// Showcase configuration
#[derive(Clone, Debug)]
pub struct ShowcaseConfig {
    /// Viewport width in points
    pub viewport_width: f32,
    /// Viewport height in points; frames are at least this tall
    pub viewport_height: f32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            viewport_width: 390.0,
            viewport_height: 844.0,
        }
    }
}

/// A widget together with its runtime services and last view
struct MountedWidget {
    kind: WidgetKind,
    widget: Box<dyn Widget>,
    cx: WidgetContext,
    view: Element,
}

/// Per-widget part of a [`Frame`]
#[derive(Clone, Debug, Serialize)]
pub struct WidgetSnapshot {
    pub kind: WidgetKind,
    pub state: WidgetSummary,
    pub timers: usize,
}

/// Everything presented at one instant
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    pub index: u64,
    pub time_secs: f64,
    /// Canvas size: viewport width by content (or viewport) height
    pub size: Size,
    pub animating: bool,
    pub widgets: Vec<WidgetSnapshot>,
    pub root: RenderNode,
}

impl Frame {
    pub fn widget(&self, kind: WidgetKind) -> Option<&WidgetSnapshot> {
        self.widgets.iter().find(|w| w.kind == kind)
    }

    /// Resolved node `key` inside the subtree of widget `kind`
    pub fn node(&self, kind: WidgetKind, key: &str) -> Option<&RenderNode> {
        self.root.find(kind.name())?.find(key)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_svg(&self) -> Result<String> {
        Ok(render_svg(&self.root, self.size)?)
    }
}

/// The headless showcase application
///
/// ```
/// use motif_app::{ShowcaseApp, WidgetKind};
/// use std::time::Duration;
///
/// let mut app = ShowcaseApp::new();
/// app.mount();
/// app.appear_all();
/// app.advance(Duration::from_secs(5));
///
/// let frame = app.frame().unwrap();
/// let label = frame.node(WidgetKind::ProgressLoader, "label").unwrap();
/// assert_eq!(label.kind, motif_layout::ElementKind::Text("50%".into()));
/// ```
pub struct ShowcaseApp {
    config: ShowcaseConfig,
    graph: SharedReactiveGraph,
    scheduler: AnimationScheduler,
    render: RenderState,
    /// Mounted widgets in display order
    widgets: Vec<MountedWidget>,
    tree: Element,
}

impl ShowcaseApp {
    /// Create an app with default configuration and nothing mounted
    pub fn new() -> Self {
        Self::with_config(ShowcaseConfig::default())
    }

    pub fn with_config(config: ShowcaseConfig) -> Self {
        Self {
            config,
            graph: ReactiveGraph::shared(),
            scheduler: AnimationScheduler::new(),
            render: RenderState::new(),
            widgets: Vec::new(),
            tree: ContentView::compose(Vec::new()),
        }
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount every widget that is not mounted yet
    pub fn mount(&mut self) {
        for kind in WidgetKind::ALL {
            if !self.is_mounted(kind) {
                self.mount_widget(kind);
            }
        }
    }

    /// Mount one widget with fresh state; no-op if already mounted
    pub fn mount_widget(&mut self, kind: WidgetKind) {
        if self.is_mounted(kind) {
            tracing::warn!(widget = %kind, "already mounted");
            return;
        }

        let mut cx = WidgetContext::new(kind.name(), self.graph.clone(), self.scheduler.handle());
        let widget = kind.build(&mut cx);
        let view = widget.view();
        let position = self.widgets.partition_point(|w| w.kind < kind);
        self.widgets.insert(
            position,
            MountedWidget {
                kind,
                widget,
                cx,
                view,
            },
        );
        tracing::info!(widget = %kind, "mounted");
        self.sync();
    }

    /// Unmount a widget, cancelling its timers and disposing its state
    pub fn unmount(&mut self, kind: WidgetKind) -> Result<()> {
        let position = self.position(kind)?;
        let mut mounted = self.widgets.remove(position);
        mounted.widget.on_disappear(&mut mounted.cx);
        let (timers, signals) = mounted.cx.teardown();
        tracing::info!(widget = %kind, timers, signals, "unmounted");
        self.sync();
        Ok(())
    }

    pub fn is_mounted(&self, kind: WidgetKind) -> bool {
        self.widgets.iter().any(|w| w.kind == kind)
    }

    /// Mounted widgets in display order
    pub fn mounted(&self) -> Vec<WidgetKind> {
        self.widgets.iter().map(|w| w.kind).collect()
    }

    // =========================================================================
    // Triggers
    // =========================================================================

    /// Deliver an appearance event to every mounted widget
    pub fn appear_all(&mut self) {
        for mounted in &mut self.widgets {
            mounted.widget.on_appear(&mut mounted.cx);
        }
        self.sync();
    }

    pub fn appear(&mut self, kind: WidgetKind) -> Result<()> {
        let mounted = self.widget_mut(kind)?;
        mounted.widget.on_appear(&mut mounted.cx);
        self.sync();
        Ok(())
    }

    pub fn tap(&mut self, kind: WidgetKind) -> Result<()> {
        let mounted = self.widget_mut(kind)?;
        tracing::debug!(widget = %kind, "tap");
        mounted.widget.on_tap(&mut mounted.cx);
        self.sync();
        Ok(())
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance virtual time by `dt`
    ///
    /// Running transitions advance first; timer fires due within the frame
    /// are then delivered in order, so changes they cause start animating on
    /// the next frame.
    pub fn advance(&mut self, dt: Duration) {
        self.render.tick(dt.as_secs_f32());

        let deadline = self.scheduler.deadline(dt);
        while let Some(fire) = self.scheduler.pop_due(deadline) {
            match self.widgets.iter_mut().find(|w| w.cx.owns_timer(fire.id)) {
                Some(mounted) => {
                    mounted.widget.on_timer(&mut mounted.cx, fire);
                    mounted.cx.release_spent(fire.id);
                }
                None => {
                    tracing::warn!(id = ?fire.id, "timer fire without an owner, invalidating");
                    self.scheduler.handle().invalidate(fire.id);
                }
            }
        }
        self.scheduler.finish_frame(deadline);
        self.sync();
    }

    /// Rebuild dirty widgets and diff the container into the render state
    fn sync(&mut self) {
        let mut rebuilt = 0;
        for mounted in &mut self.widgets {
            if mounted.cx.take_dirty() {
                mounted.view = mounted.widget.view();
                rebuilt += 1;
            }
        }

        let tree = ContentView::compose(self.widgets.iter().map(|w| w.view.clone()));
        if rebuilt == 0 && tree == self.tree {
            return;
        }
        self.render.update(&tree);
        self.tree = tree;

        let stats = self.render.stats();
        tracing::debug!(
            rebuilt,
            started = stats.started,
            animating = stats.animating_nodes,
            "views synced"
        );
    }

    /// Resolve and lay out what is presented right now
    pub fn frame(&self) -> Result<Frame> {
        let mut root = self.render.resolve(&self.tree);
        let content = compute_layout(&mut root, self.config.viewport_width)?;

        let widgets = self
            .widgets
            .iter()
            .map(|w| WidgetSnapshot {
                kind: w.kind,
                state: w.widget.summary(),
                timers: w.cx.timer_count(),
            })
            .collect();

        Ok(Frame {
            index: self.scheduler.frame_count(),
            time_secs: self.scheduler.now().as_secs_f64(),
            size: Size::new(
                self.config.viewport_width,
                content.height.max(self.config.viewport_height),
            ),
            animating: self.render.is_animating(),
            widgets,
            root,
        })
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// State values of one widget
    pub fn summary(&self, kind: WidgetKind) -> Result<WidgetSummary> {
        let position = self.position(kind)?;
        Ok(self.widgets[position].widget.summary())
    }

    /// Current descriptor tree of the container
    pub fn view(&self) -> &Element {
        &self.tree
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn timer_count(&self) -> usize {
        self.scheduler.timer_count()
    }

    pub fn signal_count(&self) -> usize {
        self.graph
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .stats()
            .signal_count
    }

    pub fn is_animating(&self) -> bool {
        self.render.is_animating()
    }

    fn position(&self, kind: WidgetKind) -> Result<usize> {
        self.widgets
            .iter()
            .position(|w| w.kind == kind)
            .ok_or(ShowcaseError::NotMounted(kind))
    }

    fn widget_mut(&mut self, kind: WidgetKind) -> Result<&mut MountedWidget> {
        let position = self.position(kind)?;
        Ok(&mut self.widgets[position])
    }
}

impl Default for ShowcaseApp {
    fn default() -> Self {
        Self::new()
    }
}
