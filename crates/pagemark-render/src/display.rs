//! Frame composition into a backend-agnostic display list.

use crate::glyph::{Glyph, GlyphProvider};
use crate::renderer::{GridStyle, RenderContext};
use kurbo::{Point, Rect};
use pagemark_core::elements::TextStyle;
use pagemark_core::{Element, ElementId, ElementKind, GuideKind, GuideOrientation, HandleKind};
use peniko::Color;

/// Grid line/dot color.
const GRID_COLOR: Color = Color::from_rgba8(229, 231, 235, 255);
/// Guide color for element-edge alignment (pink).
const GUIDE_EDGE_COLOR: Color = Color::from_rgba8(236, 72, 153, 180);
/// Guide color for the canvas center (amber).
const GUIDE_CENTER_COLOR: Color = Color::from_rgba8(245, 158, 11, 180);

const GUIDE_WIDTH: f64 = 1.0;
const GUIDE_MARKER_RADIUS: f64 = 2.5;
const SELECTION_STROKE_WIDTH: f64 = 1.5;
const GRID_DOT_RADIUS: f64 = 1.0;

/// One backend-agnostic drawing command. All coordinates are canvas units.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    FillRect {
        rect: Rect,
        color: Color,
        corner_radius: f64,
    },
    FillEllipse {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        corner_radius: f64,
    },
    StrokeEllipse {
        rect: Rect,
        color: Color,
        width: f64,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
        dashed: bool,
    },
    Dot {
        center: Point,
        radius: f64,
        color: Color,
    },
    Text {
        rect: Rect,
        content: String,
        style: TextStyle,
    },
    Glyph {
        rect: Rect,
        glyph: Glyph,
        color: Color,
    },
    /// A resize handle; backends draw their own chrome for it.
    Handle {
        center: Point,
        kind: HandleKind,
    },
    /// Mount point for the host's inline text editor, replacing the static
    /// text of the element being edited.
    EditorMount {
        id: ElementId,
        rect: Rect,
        buffer: String,
        style: TextStyle,
    },
}

/// An ordered list of drawing commands for one frame.
#[derive(Debug, Default)]
pub struct DisplayList {
    pub items: Vec<DrawItem>,
}

impl DisplayList {
    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }
}

/// Compose one frame: grid, elements in z-order, selection chrome, guides
/// and the inline-editor mount. Read-only over editor state.
pub fn compose(ctx: &RenderContext, glyphs: &dyn GlyphProvider) -> DisplayList {
    let mut list = DisplayList::default();
    let editor = ctx.editor;
    let canvas = editor.scene.canvas;

    draw_grid(&mut list, ctx, canvas.width, canvas.height);

    let editing = editor.editing();
    for element in editor.scene.elements_ordered() {
        match editing {
            Some((id, buffer)) if id == element.id() && element.is_text() => {
                draw_editor_mount(&mut list, element, buffer);
            }
            _ => draw_element(&mut list, element, glyphs),
        }
    }

    for &id in editor.selection() {
        if let Some(element) = editor.scene.element(id) {
            list.push(DrawItem::StrokeRect {
                rect: element.bounds(),
                color: ctx.selection_color,
                width: SELECTION_STROKE_WIDTH,
                corner_radius: 0.0,
            });
        }
    }

    if let [sole] = editor.selection()[..] {
        if let Some(element) = editor.scene.element(sole) {
            for kind in HandleKind::all() {
                list.push(DrawItem::Handle {
                    center: kind.position(element.frame),
                    kind,
                });
            }
        }
    }

    let marker_frame = editor
        .active_element()
        .and_then(|id| editor.scene.element(id))
        .map(|e| e.frame);
    for guide in editor.guides() {
        let (from, to, marker) = match guide.orientation {
            GuideOrientation::Vertical => (
                Point::new(guide.position, 0.0),
                Point::new(guide.position, canvas.height),
                marker_frame.map(|f| Point::new(guide.position, f.center().y)),
            ),
            GuideOrientation::Horizontal => (
                Point::new(0.0, guide.position),
                Point::new(canvas.width, guide.position),
                marker_frame.map(|f| Point::new(f.center().x, guide.position)),
            ),
        };
        let (color, dashed) = match guide.kind {
            GuideKind::ElementEdge => (GUIDE_EDGE_COLOR, false),
            GuideKind::CanvasCenter => (GUIDE_CENTER_COLOR, true),
        };
        list.push(DrawItem::Line {
            from,
            to,
            color,
            width: GUIDE_WIDTH,
            dashed,
        });
        if let Some(center) = marker {
            list.push(DrawItem::Dot {
                center,
                radius: GUIDE_MARKER_RADIUS,
                color,
            });
        }
    }

    list
}

fn draw_grid(list: &mut DisplayList, ctx: &RenderContext, width: f64, height: f64) {
    let spacing = ctx.editor.settings.grid_size;
    if spacing <= 0.0 || !spacing.is_finite() {
        return;
    }
    match ctx.grid_style {
        GridStyle::None => {}
        GridStyle::Lines => {
            let mut x = spacing;
            while x < width {
                list.push(DrawItem::Line {
                    from: Point::new(x, 0.0),
                    to: Point::new(x, height),
                    color: GRID_COLOR,
                    width: 1.0,
                    dashed: false,
                });
                x += spacing;
            }
            let mut y = spacing;
            while y < height {
                list.push(DrawItem::Line {
                    from: Point::new(0.0, y),
                    to: Point::new(width, y),
                    color: GRID_COLOR,
                    width: 1.0,
                    dashed: false,
                });
                y += spacing;
            }
        }
        GridStyle::Dots => {
            let mut x = spacing;
            while x < width {
                let mut y = spacing;
                while y < height {
                    list.push(DrawItem::Dot {
                        center: Point::new(x, y),
                        radius: GRID_DOT_RADIUS,
                        color: GRID_COLOR,
                    });
                    y += spacing;
                }
                x += spacing;
            }
        }
    }
}

fn draw_element(list: &mut DisplayList, element: &Element, glyphs: &dyn GlyphProvider) {
    let rect = element.bounds();
    match &element.kind {
        ElementKind::Text { content, style } => {
            list.push(DrawItem::Text {
                rect,
                content: content.clone(),
                style: style.clone(),
            });
        }
        ElementKind::Shape { style } => {
            use pagemark_core::elements::ShapeForm;
            match style.form {
                ShapeForm::Rectangle => {
                    if let Some(fill) = style.fill_color {
                        list.push(DrawItem::FillRect {
                            rect,
                            color: fill.into(),
                            corner_radius: style.corner_radius,
                        });
                    }
                    if style.stroke_width > 0.0 {
                        list.push(DrawItem::StrokeRect {
                            rect,
                            color: style.stroke_color.into(),
                            width: style.stroke_width,
                            corner_radius: style.corner_radius,
                        });
                    }
                }
                ShapeForm::Ellipse => {
                    if let Some(fill) = style.fill_color {
                        list.push(DrawItem::FillEllipse {
                            rect,
                            color: fill.into(),
                        });
                    }
                    if style.stroke_width > 0.0 {
                        list.push(DrawItem::StrokeEllipse {
                            rect,
                            color: style.stroke_color.into(),
                            width: style.stroke_width,
                        });
                    }
                }
            }
        }
        ElementKind::Line { style } => {
            // A horizontal rule across the vertical middle of the frame.
            let y = rect.center().y;
            list.push(DrawItem::Line {
                from: Point::new(rect.x0, y),
                to: Point::new(rect.x1, y),
                color: style.color.into(),
                width: style.thickness,
                dashed: style.dashed,
            });
        }
        ElementKind::Icon { name, style } => {
            // Unresolved names degrade to the fallback glyph; the element is
            // always drawn.
            list.push(DrawItem::Glyph {
                rect,
                glyph: glyphs.glyph_or_fallback(name),
                color: style.color.into(),
            });
        }
        ElementKind::ProgressBar { style } => {
            list.push(DrawItem::FillRect {
                rect,
                color: style.track_color.into(),
                corner_radius: style.corner_radius,
            });
            let fill_width = rect.width() * style.progress / 100.0;
            if fill_width > 0.0 {
                list.push(DrawItem::FillRect {
                    rect: Rect::new(rect.x0, rect.y0, rect.x0 + fill_width, rect.y1),
                    color: style.fill_color.into(),
                    corner_radius: style.corner_radius,
                });
            }
        }
    }
}

fn draw_editor_mount(list: &mut DisplayList, element: &Element, buffer: &str) {
    let ElementKind::Text { style, .. } = &element.kind else {
        return;
    };
    list.push(DrawItem::EditorMount {
        id: element.id(),
        rect: element.bounds(),
        buffer: buffer.to_string(),
        style: style.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{FALLBACK_GLYPH, StaticGlyphProvider};
    use kurbo::Size;
    use pagemark_core::elements::Frame;
    use pagemark_core::input::{EditorMessage, Modifiers};
    use pagemark_core::{Editor, Scene};

    fn base_editor() -> Editor {
        let mut editor = Editor::new(Scene::new());
        editor.settings.smart_snapping = false;
        editor.settings.grid_size = 0.0; // no grid items in tests
        editor
    }

    fn compose_default(editor: &Editor) -> DisplayList {
        let ctx = RenderContext::new(editor, Size::new(794.0, 1123.0));
        compose(&ctx, &StaticGlyphProvider::new())
    }

    #[test]
    fn test_elements_in_z_order() {
        let mut editor = base_editor();
        editor.scene.insert(
            Element::shape(Frame::new(0.0, 0.0, 80.0, 40.0), Default::default()).with_z_index(5),
        );
        editor.scene.insert(
            Element::shape(Frame::new(100.0, 0.0, 80.0, 40.0), Default::default()).with_z_index(1),
        );

        let list = compose_default(&editor);
        // Two filled shapes; the lower z-index (x=100) paints first.
        let fills: Vec<Rect> = list
            .iter()
            .filter_map(|i| match i {
                DrawItem::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].x0, 100.0);
        assert_eq!(fills[1].x0, 0.0);
    }

    #[test]
    fn test_progress_fill_width() {
        let mut editor = base_editor();
        editor
            .scene
            .insert(Element::progress_bar(Frame::new(10.0, 10.0, 200.0, 20.0), 25.0));

        let list = compose_default(&editor);
        let fills: Vec<Rect> = list
            .iter()
            .filter_map(|i| match i {
                DrawItem::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // Track plus fill; fill is a quarter of the track.
        assert_eq!(fills.len(), 2);
        assert!((fills[1].width() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        let mut editor = base_editor();
        editor
            .scene
            .insert(Element::icon(Frame::new(10.0, 10.0, 32.0, 32.0), "definitely-missing"));

        let list = compose_default(&editor);
        assert!(list.iter().any(|i| matches!(
            i,
            DrawItem::Glyph { glyph, .. } if *glyph == FALLBACK_GLYPH
        )));
    }

    #[test]
    fn test_sole_selection_gets_eight_handles() {
        let mut editor = base_editor();
        editor.scene.insert(Element::shape(
            Frame::new(100.0, 100.0, 80.0, 40.0),
            Default::default(),
        ));
        editor.dispatch(EditorMessage::PointerDown {
            position: Point::new(120.0, 120.0),
            modifiers: Modifiers::default(),
        });
        editor.dispatch(EditorMessage::PointerUp {
            position: Point::new(120.0, 120.0),
        });

        let list = compose_default(&editor);
        let handles = list
            .iter()
            .filter(|i| matches!(i, DrawItem::Handle { .. }))
            .count();
        assert_eq!(handles, 8);
        assert!(list
            .iter()
            .any(|i| matches!(i, DrawItem::StrokeRect { .. })));
    }

    #[test]
    fn test_guides_color_coded_and_center_dashed() {
        let mut editor = Editor::new(Scene::new());
        editor.settings.grid_size = 0.0;
        editor.scene.insert(Element::shape(
            Frame::new(100.0, 100.0, 80.0, 40.0),
            Default::default(),
        ));

        // Drag the shape so its center sits near the canvas center line.
        let center_x = editor.scene.canvas.width / 2.0;
        editor.dispatch(EditorMessage::PointerDown {
            position: Point::new(120.0, 120.0),
            modifiers: Modifiers::default(),
        });
        editor.dispatch(EditorMessage::PointerMove {
            position: Point::new(center_x - 18.0, 120.0),
        });
        assert!(!editor.guides().is_empty());

        let list = compose_default(&editor);
        let guide_lines: Vec<&DrawItem> = list
            .iter()
            .filter(|i| matches!(i, DrawItem::Line { color, .. } if *color == GUIDE_CENTER_COLOR))
            .collect();
        assert_eq!(guide_lines.len(), 1);
        assert!(matches!(guide_lines[0], DrawItem::Line { dashed: true, .. }));
        // Marker dot at the dragged element's midpoint.
        assert!(list
            .iter()
            .any(|i| matches!(i, DrawItem::Dot { color, .. } if *color == GUIDE_CENTER_COLOR)));
    }

    #[test]
    fn test_editing_text_mounted_not_drawn() {
        let mut editor = base_editor();
        let id = editor.scene.insert(Element::text(Frame::new(100.0, 100.0, 120.0, 30.0), "hello"));

        editor.dispatch(EditorMessage::DoubleClick {
            position: Point::new(120.0, 115.0),
        });
        editor.dispatch(EditorMessage::TextInput("!".to_string()));

        let list = compose_default(&editor);
        assert!(!list.iter().any(|i| matches!(i, DrawItem::Text { .. })));
        assert!(list.iter().any(|i| matches!(
            i,
            DrawItem::EditorMount { id: m, buffer, .. } if *m == id && buffer == "hello!"
        )));
    }

    #[test]
    fn test_grid_styles() {
        let mut editor = base_editor();
        editor.settings.grid_size = 100.0;

        let ctx = RenderContext::new(&editor, Size::new(794.0, 1123.0)).with_grid(GridStyle::None);
        assert!(compose(&ctx, &StaticGlyphProvider::new()).is_empty());

        let ctx = RenderContext::new(&editor, Size::new(794.0, 1123.0)).with_grid(GridStyle::Lines);
        let lines = compose(&ctx, &StaticGlyphProvider::new());
        // 7 vertical + 11 horizontal lines inside a 794x1123 canvas.
        assert_eq!(lines.len(), 18);

        let ctx = RenderContext::new(&editor, Size::new(794.0, 1123.0)).with_grid(GridStyle::Dots);
        let dots = compose(&ctx, &StaticGlyphProvider::new());
        assert_eq!(dots.len(), 77);
        assert!(dots.iter().all(|i| matches!(i, DrawItem::Dot { .. })));
    }
}
