//! Render state: the presentation layer between descriptors and frames
//!
//! Widgets rebuild descriptor trees from scratch; [`RenderState`] remembers
//! what each node currently *shows*. When a new descriptor arrives for a
//! node it diffs the animatable properties and, for every changed one:
//!
//! - starts a [`Transition`] from the presented value to the new target when
//!   the node carries an [`Animation`]
//! - snaps to the target otherwise
//!
//! Nodes are identified by their path from the root: each segment is the
//! node's key, or its child index when it has none. State of nodes that no
//! longer appear in the tree is dropped.
//!
//! [`RenderState::tick`] advances every running transition and
//! [`RenderState::resolve`] produces a [`RenderNode`] tree of concrete
//! values ready for layout and export.

use motif_animation::{Animation, Interpolate, Transition};
use motif_core::{Brush, Color, Rect, Size, Stroke};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::diff::{diff_styles, same_kind, Property};
use crate::element::{EdgeInsets, Element, ElementKind, ElementStyle};

/// Path segment separator
const PATH_SEPARATOR: char = '/';

// =============================================================================
// Per-property transitions
// =============================================================================

#[derive(Clone, Debug, Default)]
struct PropertyTransitions {
    frame: Option<Transition<Size>>,
    fill: Option<Transition<Brush>>,
    stroke_color: Option<Transition<Color>>,
    stroke_width: Option<Transition<f32>>,
    trim_start: Option<Transition<f32>>,
    trim_end: Option<Transition<f32>>,
    corner_radius: Option<Transition<f32>>,
    rotation: Option<Transition<f32>>,
    scale: Option<Transition<f32>>,
    opacity: Option<Transition<f32>>,
    foreground: Option<Transition<Color>>,
}

fn present<T: Interpolate>(slot: &Option<Transition<T>>, target: T) -> T {
    slot.as_ref().map_or(target, Transition::value)
}

/// Replace the slot with a transition from `from` to `to`, or clear it
fn retarget<T: Interpolate>(
    slot: &mut Option<Transition<T>>,
    from: Option<T>,
    to: Option<T>,
    animation: Option<Animation>,
) {
    *slot = match (from, to, animation) {
        (Some(from), Some(to), Some(animation)) => Some(Transition::new(from, to, animation)),
        _ => None,
    };
}

/// Tick one slot; returns true while it is still running
fn tick_slot<T: Interpolate>(slot: &mut Option<Transition<T>>, dt: f32) -> bool {
    let Some(transition) = slot else {
        return false;
    };
    transition.tick(dt);
    if transition.is_finished() {
        *slot = None;
        return false;
    }
    true
}

impl PropertyTransitions {
    fn tick(&mut self, dt: f32) -> bool {
        // Non-short-circuiting: every slot must advance
        let mut running = tick_slot(&mut self.frame, dt);
        running |= tick_slot(&mut self.fill, dt);
        running |= tick_slot(&mut self.stroke_color, dt);
        running |= tick_slot(&mut self.stroke_width, dt);
        running |= tick_slot(&mut self.trim_start, dt);
        running |= tick_slot(&mut self.trim_end, dt);
        running |= tick_slot(&mut self.corner_radius, dt);
        running |= tick_slot(&mut self.rotation, dt);
        running |= tick_slot(&mut self.scale, dt);
        running |= tick_slot(&mut self.opacity, dt);
        running |= tick_slot(&mut self.foreground, dt);
        running
    }

    fn is_running(&self) -> bool {
        self.frame.is_some()
            || self.fill.is_some()
            || self.stroke_color.is_some()
            || self.stroke_width.is_some()
            || self.trim_start.is_some()
            || self.trim_end.is_some()
            || self.corner_radius.is_some()
            || self.rotation.is_some()
            || self.scale.is_some()
            || self.opacity.is_some()
            || self.foreground.is_some()
    }

    fn running(&self, property: Property) -> Option<&Animation> {
        match property {
            Property::Frame => self.frame.as_ref().map(Transition::animation),
            Property::Fill => self.fill.as_ref().map(Transition::animation),
            Property::StrokeColor => self.stroke_color.as_ref().map(Transition::animation),
            Property::StrokeWidth => self.stroke_width.as_ref().map(Transition::animation),
            Property::TrimStart => self.trim_start.as_ref().map(Transition::animation),
            Property::TrimEnd => self.trim_end.as_ref().map(Transition::animation),
            Property::CornerRadius => self.corner_radius.as_ref().map(Transition::animation),
            Property::Rotation => self.rotation.as_ref().map(Transition::animation),
            Property::Scale => self.scale.as_ref().map(Transition::animation),
            Property::Opacity => self.opacity.as_ref().map(Transition::animation),
            Property::Foreground => self.foreground.as_ref().map(Transition::animation),
        }
    }
}

// =============================================================================
// Node state
// =============================================================================

/// What one node currently presents
#[derive(Clone, Debug)]
struct NodeState {
    kind: ElementKind,
    /// Last descriptor values (the model)
    target: ElementStyle,
    transitions: PropertyTransitions,
    generation: u64,
}

impl NodeState {
    fn new(element: &Element, generation: u64) -> Self {
        Self {
            kind: element.kind.clone(),
            target: element.style.clone(),
            transitions: PropertyTransitions::default(),
            generation,
        }
    }

    /// Values on screen right now
    fn presented(&self) -> ElementStyle {
        let t = &self.transitions;
        let target = &self.target;
        ElementStyle {
            frame: target.frame.map(|f| present(&t.frame, f)),
            fill: target.fill.clone().map(|f| present(&t.fill, f)),
            stroke: target.stroke.map(|s| {
                Stroke::new(
                    present(&t.stroke_color, s.color),
                    present(&t.stroke_width, s.width),
                )
            }),
            trim_start: present(&t.trim_start, target.trim_start),
            trim_end: present(&t.trim_end, target.trim_end),
            corner_radius: present(&t.corner_radius, target.corner_radius),
            rotation: present(&t.rotation, target.rotation),
            scale: present(&t.scale, target.scale),
            opacity: present(&t.opacity, target.opacity),
            foreground: target.foreground.map(|c| present(&t.foreground, c)),
            font_size: target.font_size,
            padding: target.padding,
            spacing: target.spacing,
        }
    }

    /// Apply a new descriptor; returns the properties that changed
    fn apply(&mut self, element: &Element) -> usize {
        let new = &element.style;
        let changes = diff_styles(&self.target, new);
        if changes.is_empty() {
            self.kind = element.kind.clone();
            return 0;
        }

        let from = self.presented();
        let animation = element.animation;
        let t = &mut self.transitions;
        for property in &changes {
            match property {
                Property::Frame => retarget(&mut t.frame, from.frame, new.frame, animation),
                Property::Fill => {
                    retarget(&mut t.fill, from.fill.clone(), new.fill.clone(), animation)
                }
                Property::StrokeColor => retarget(
                    &mut t.stroke_color,
                    from.stroke.map(|s| s.color),
                    new.stroke.map(|s| s.color),
                    animation,
                ),
                Property::StrokeWidth => retarget(
                    &mut t.stroke_width,
                    from.stroke.map(|s| s.width),
                    new.stroke.map(|s| s.width),
                    animation,
                ),
                Property::TrimStart => retarget(
                    &mut t.trim_start,
                    Some(from.trim_start),
                    Some(new.trim_start),
                    animation,
                ),
                Property::TrimEnd => retarget(
                    &mut t.trim_end,
                    Some(from.trim_end),
                    Some(new.trim_end),
                    animation,
                ),
                Property::CornerRadius => retarget(
                    &mut t.corner_radius,
                    Some(from.corner_radius),
                    Some(new.corner_radius),
                    animation,
                ),
                Property::Rotation => retarget(
                    &mut t.rotation,
                    Some(from.rotation),
                    Some(new.rotation),
                    animation,
                ),
                Property::Scale => {
                    retarget(&mut t.scale, Some(from.scale), Some(new.scale), animation)
                }
                Property::Opacity => retarget(
                    &mut t.opacity,
                    Some(from.opacity),
                    Some(new.opacity),
                    animation,
                ),
                Property::Foreground => {
                    retarget(&mut t.foreground, from.foreground, new.foreground, animation)
                }
            }
        }

        self.kind = element.kind.clone();
        self.target = new.clone();
        changes.len()
    }
}

// =============================================================================
// RenderNode - resolved output
// =============================================================================

/// A node with every property resolved to the value presented this frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub kind: ElementKind,
    /// Filled in by layout
    pub bounds: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Brush>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    pub trim_start: f32,
    pub trim_end: f32,
    pub corner_radius: f32,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    pub font_size: f32,
    #[serde(skip)]
    pub padding: EdgeInsets,
    #[serde(skip)]
    pub spacing: f32,
    /// Any property of this node is mid-transition
    pub animating: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    fn from_style(path: String, element: &Element, style: ElementStyle, animating: bool) -> Self {
        Self {
            path,
            key: element.key.clone(),
            kind: element.kind.clone(),
            bounds: Rect::default(),
            frame: style.frame,
            fill: style.fill,
            stroke: style.stroke,
            trim_start: style.trim_start,
            trim_end: style.trim_end,
            corner_radius: style.corner_radius,
            rotation: style.rotation,
            scale: style.scale,
            opacity: style.opacity,
            foreground: style.foreground,
            font_size: style.font_size,
            padding: style.padding,
            spacing: style.spacing,
            animating,
            children: Vec::new(),
        }
    }

    /// Find the first node (depth-first) with the given key
    pub fn find(&self, key: &str) -> Option<&RenderNode> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    /// Visit every node depth-first
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a RenderNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

// =============================================================================
// RenderState
// =============================================================================

/// Counters for logging and tests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub nodes: usize,
    pub animating_nodes: usize,
    pub started: usize,
    pub dropped: usize,
}

/// Presentation state of every node, keyed by path
#[derive(Debug, Default)]
pub struct RenderState {
    nodes: FxHashMap<String, NodeState>,
    generation: u64,
    /// Changed properties applied by the last update
    last_started: usize,
    last_dropped: usize,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path segment for `element` as child number `index`
    pub fn segment(element: &Element, index: usize) -> String {
        element.key.clone().unwrap_or_else(|| index.to_string())
    }

    /// Diff a new descriptor tree against the presented state
    pub fn update(&mut self, root: &Element) {
        self.generation += 1;
        let generation = self.generation;
        let mut changed = 0;
        self.visit_update(root, Self::segment(root, 0), generation, &mut changed);

        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.generation == generation);
        let dropped = before - self.nodes.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped state of vanished nodes");
        }
        self.last_started = changed;
        self.last_dropped = dropped;
    }

    fn visit_update(&mut self, element: &Element, path: String, generation: u64, changed: &mut usize) {
        for (index, child) in element.children.iter().enumerate() {
            let child_path = format!("{path}{PATH_SEPARATOR}{}", Self::segment(child, index));
            self.visit_update(child, child_path, generation, changed);
        }

        match self.nodes.get_mut(&path) {
            Some(node) if same_kind(&node.kind, &element.kind) => {
                let count = node.apply(element);
                if count > 0 {
                    tracing::trace!(%path, count, animated = element.animation.is_some(), "properties changed");
                }
                *changed += count;
                node.generation = generation;
            }
            _ => {
                self.nodes.insert(path, NodeState::new(element, generation));
            }
        }
    }

    /// Advance all transitions by `dt` seconds; returns true while any runs
    pub fn tick(&mut self, dt: f32) -> bool {
        let mut running = false;
        for node in self.nodes.values_mut() {
            running |= node.transitions.tick(dt);
        }
        running
    }

    /// Does anything still need frames?
    pub fn is_animating(&self) -> bool {
        self.nodes.values().any(|n| n.transitions.is_running())
    }

    /// Resolve `root` against the presented state
    ///
    /// Nodes the state has never seen resolve to their descriptor values.
    pub fn resolve(&self, root: &Element) -> RenderNode {
        self.resolve_node(root, Self::segment(root, 0))
    }

    fn resolve_node(&self, element: &Element, path: String) -> RenderNode {
        let (style, animating) = match self.nodes.get(&path) {
            Some(node) => (node.presented(), node.transitions.is_running()),
            None => (element.style.clone(), false),
        };

        let children = element
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let child_path = format!("{path}{PATH_SEPARATOR}{}", Self::segment(child, index));
                self.resolve_node(child, child_path)
            })
            .collect();

        let mut node = RenderNode::from_style(path, element, style, animating);
        node.children = children;
        node
    }

    /// Animation currently driving `property` of the node at `path`
    pub fn running_animation(&self, path: &str, property: Property) -> Option<&Animation> {
        self.nodes.get(path)?.transitions.running(property)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn stats(&self) -> RenderStats {
        RenderStats {
            nodes: self.nodes.len(),
            animating_nodes: self
                .nodes
                .values()
                .filter(|n| n.transitions.is_running())
                .count(),
            started: self.last_started,
            dropped: self.last_dropped,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
