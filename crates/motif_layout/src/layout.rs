//! Layout of resolved render trees
//!
//! Each frame's [`RenderNode`] tree is mirrored into a fresh Taffy tree and
//! the computed boxes are written back as absolute [`RenderNode::bounds`].
//! Frames are laid out with their *presented* size, so a morphing shape
//! pushes its siblings around while it animates.
//!
//! - HStack / VStack / ScrollView map to flex rows and columns
//! - ZStack maps to a single-cell grid; every child occupies that cell and is
//!   centered in it
//! - Text and icons are leaves measured from their font size

use taffy::prelude::*;

use crate::element::ElementKind;
use crate::render_state::RenderNode;

/// Average advance of a glyph relative to the font size
const GLYPH_WIDTH_FACTOR: f32 = 0.6;

/// Line height relative to the font size
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Layout failures
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("taffy layout failed: {0}")]
    Taffy(String),

    #[error("failed to write SVG: {0}")]
    Format(#[from] std::fmt::Error),
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Taffy(format!("{err:?}"))
    }
}

/// Context stored with leaves that measure their own content
#[derive(Clone, Debug)]
pub struct MeasureContext {
    pub chars: usize,
    pub font_size: f32,
    /// Icons are square glyphs
    pub square: bool,
}

impl MeasureContext {
    fn for_node(node: &RenderNode) -> Option<Self> {
        match &node.kind {
            ElementKind::Text(content) => Some(Self {
                chars: content.chars().count(),
                font_size: node.font_size,
                square: false,
            }),
            ElementKind::Icon(_) => Some(Self {
                chars: 1,
                font_size: node.font_size,
                square: true,
            }),
            _ => None,
        }
    }

    /// Estimated natural size of the content
    pub fn measure(&self) -> (f32, f32) {
        let line = self.font_size * LINE_HEIGHT_FACTOR;
        if self.square {
            return (line, line);
        }
        if self.chars == 0 {
            return (0.0, 0.0);
        }
        (self.chars as f32 * self.font_size * GLYPH_WIDTH_FACTOR, line)
    }
}

fn measure_function(
    known_dimensions: Size<Option<f32>>,
    _available_space: Size<AvailableSpace>,
    _node_id: NodeId,
    node_context: Option<&mut MeasureContext>,
    _style: &Style,
) -> Size<f32> {
    if let (Some(width), Some(height)) = (known_dimensions.width, known_dimensions.height) {
        return Size { width, height };
    }
    let Some(ctx) = node_context else {
        return Size::ZERO;
    };
    let (width, height) = ctx.measure();
    Size {
        width: known_dimensions.width.unwrap_or(width),
        height: known_dimensions.height.unwrap_or(height),
    }
}

/// Taffy style for one render node
fn node_style(node: &RenderNode, in_zstack: bool) -> Style {
    let mut style = Style {
        padding: Rect {
            left: length(node.padding.leading),
            right: length(node.padding.trailing),
            top: length(node.padding.top),
            bottom: length(node.padding.bottom),
        },
        flex_shrink: 0.0,
        ..Default::default()
    };

    if let Some(frame) = node.frame {
        style.size = Size {
            width: length(frame.width.max(0.0)),
            height: length(frame.height.max(0.0)),
        };
    }

    match node.kind {
        ElementKind::HStack | ElementKind::VStack | ElementKind::ScrollView => {
            style.display = Display::Flex;
            style.flex_direction = if node.kind == ElementKind::HStack {
                FlexDirection::Row
            } else {
                FlexDirection::Column
            };
            style.align_items = Some(AlignItems::Center);
            style.justify_content = Some(JustifyContent::Center);
            let gap = if node.kind == ElementKind::ScrollView {
                0.0
            } else {
                node.spacing
            };
            style.gap = Size {
                width: length(gap),
                height: length(gap),
            };
        }
        ElementKind::ZStack => {
            style.display = Display::Grid;
            style.align_items = Some(AlignItems::Center);
            style.justify_items = Some(AlignItems::Center);
        }
        _ => {}
    }

    if in_zstack {
        let cell = Line {
            start: line(1),
            end: span(1),
        };
        style.grid_row = cell;
        style.grid_column = cell;
    }

    style
}

/// Mirror `node` and its subtree into `taffy`
fn build(
    taffy: &mut TaffyTree<MeasureContext>,
    node: &RenderNode,
    in_zstack: bool,
) -> Result<NodeId, LayoutError> {
    let style = node_style(node, in_zstack);
    if node.children.is_empty() {
        let id = match MeasureContext::for_node(node) {
            Some(ctx) => taffy.new_leaf_with_context(style, ctx)?,
            None => taffy.new_leaf(style)?,
        };
        return Ok(id);
    }

    let is_zstack = node.kind == ElementKind::ZStack;
    let children = node
        .children
        .iter()
        .map(|child| build(taffy, child, is_zstack))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(taffy.new_with_children(style, &children)?)
}

/// Copy computed boxes back, converting to absolute coordinates
fn write_bounds(
    taffy: &TaffyTree<MeasureContext>,
    id: NodeId,
    node: &mut RenderNode,
    origin: (f32, f32),
) -> Result<(), LayoutError> {
    let layout = taffy.layout(id)?;
    let x = origin.0 + layout.location.x;
    let y = origin.1 + layout.location.y;
    node.bounds = motif_core::Rect::new(x, y, layout.size.width, layout.size.height);

    let child_ids = taffy.children(id)?;
    for (child_id, child) in child_ids.into_iter().zip(node.children.iter_mut()) {
        write_bounds(taffy, child_id, child, (x, y))?;
    }
    Ok(())
}

/// Lay out `root` inside a viewport `width` wide
///
/// Height is unconstrained, as inside a vertical scroll view. Returns the
/// total content size.
pub fn compute_layout(root: &mut RenderNode, width: f32) -> Result<motif_core::Size, LayoutError> {
    let mut taffy: TaffyTree<MeasureContext> = TaffyTree::new();
    // Animated sizes are fractional; bounds must track them exactly
    taffy.disable_rounding();
    let root_id = build(&mut taffy, root, false)?;

    // The outermost container fills the viewport width
    let mut root_style = taffy.style(root_id)?.clone();
    if root.frame.is_none() {
        root_style.size.width = length(width);
    }
    taffy.set_style(root_id, root_style)?;

    taffy.compute_layout_with_measure(
        root_id,
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        },
        measure_function,
    )?;

    write_bounds(&taffy, root_id, root, (0.0, 0.0))?;
    tracing::trace!(
        nodes = taffy.total_node_count(),
        height = root.bounds.size.height,
        "layout computed"
    );
    Ok(root.bounds.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{circle, hstack, scroll_view, text, vstack, zstack, Element};
    use crate::render_state::RenderState;
    use motif_core::Color;

    fn laid_out(tree: &Element, width: f32) -> RenderNode {
        let mut state = RenderState::new();
        state.update(tree);
        let mut root = state.resolve(tree);
        compute_layout(&mut root, width).unwrap();
        root
    }

    #[test]
    fn test_zstack_centers_children() {
        let tree = zstack()
            .key("stack")
            .child(circle().key("big").frame(150.0, 150.0))
            .child(circle().key("small").frame(50.0, 50.0));
        let root = laid_out(&tree, 150.0);

        let big = root.find("big").unwrap().bounds;
        let small = root.find("small").unwrap().bounds;
        assert_eq!(big.size, motif_core::Size::square(150.0));
        assert_eq!(small.center(), big.center());
    }

    #[test]
    fn test_hstack_spacing() {
        let dots = (0..5).map(|i| circle().key(format!("dot{i}")).frame(10.0, 10.0));
        let tree = hstack().key("dots").children(dots);
        let root = laid_out(&tree, 400.0);

        let first = root.find("dot0").unwrap().bounds;
        let second = root.find("dot1").unwrap().bounds;
        assert!((second.origin.x - first.origin.x - 18.0).abs() < 1e-3);
        assert_eq!(first.origin.y, second.origin.y);
    }

    #[test]
    fn test_scroll_view_stacks_vertically_and_fills_width() {
        let tree = scroll_view()
            .child(circle().key("a").frame(100.0, 100.0))
            .child(vstack().key("b").child(text("hi").font_size(20.0)));
        let root = laid_out(&tree, 390.0);

        assert_eq!(root.bounds.size.width, 390.0);
        let a = root.find("a").unwrap().bounds;
        let b = root.find("b").unwrap().bounds;
        assert_eq!(a.center().x, 195.0);
        assert!(b.origin.y >= a.max_y());
    }

    #[test]
    fn test_text_measure() {
        let ctx = MeasureContext {
            chars: 3,
            font_size: 20.0,
            square: false,
        };
        let (w, h) = ctx.measure();
        assert!((w - 36.0).abs() < 1e-3);
        assert!((h - 24.0).abs() < 1e-3);

        let empty = MeasureContext { chars: 0, ..ctx };
        assert_eq!(empty.measure(), (0.0, 0.0));
    }

    #[test]
    fn test_padding_grows_container() {
        let tree = zstack()
            .key("padded")
            .padding_vertical(8.0)
            .child(circle().fill(Color::GREEN).frame(10.0, 10.0));
        let root = laid_out(&tree, 100.0);
        assert_eq!(root.bounds.size.height, 26.0);
    }
}
