//! Walks a component tree and paints it through a [`ContentEmitter`].
//!
//! Rendering runs in two passes. Layout resolves every component's style on
//! the cascade, measures its text and places it: children flow top to bottom
//! inside their parent's content box unless they set `position-y`. Painting
//! then draws each box in tree order: background, text, image, children and
//! finally the border on top.

use crate::component::{ComponentContent, ComponentNode};
use crate::config::RenderOptions;
use crate::error::FolioError;
use folio_fonts::{FontCatalog, FontStyle};
use folio_render_core::{OperatorSink, RenderError, TextBlock, TextMeasurer, TextOptions};
use folio_render_lopdf::{Brush, ContentEmitter, Font, PatternFill, Pen, Stroke};
use folio_style::keys::{self, ColorKey, StyleKey};
use folio_style::{
    BorderStyle, ComponentState, DashPattern, PatternRepeat, RuleSet, Style, StyleCascade,
    StyleError, StyleKind, TextAlign,
};
use folio_traits::ResourceRegistry;
use folio_types::{ColorValue, Point, Rect, ResourceKey, Size, Thickness};

/// Circle approximation factor for the control points of a quarter arc.
const KAPPA: f32 = 0.552_284_8;

/// The style keys one kind of brush is read from.
struct BrushKeys {
    color: ColorKey,
    opacity: StyleKey<f32>,
    image: StyleKey<String>,
    repeat: StyleKey<PatternRepeat>,
    size: Option<StyleKey<Size>>,
    step: Option<StyleKey<Size>>,
    position: Option<StyleKey<Point>>,
}

const FILL_BRUSH: BrushKeys = BrushKeys {
    color: keys::FILL_COLOR,
    opacity: keys::FILL_OPACITY,
    image: keys::FILL_IMAGE,
    repeat: keys::FILL_REPEAT,
    size: Some(keys::FILL_PATTERN_SIZE),
    step: Some(keys::FILL_PATTERN_STEP),
    position: Some(keys::FILL_PATTERN_POSITION),
};

const BACKGROUND_BRUSH: BrushKeys = BrushKeys {
    color: keys::BACKGROUND_COLOR,
    opacity: keys::BACKGROUND_OPACITY,
    image: keys::BACKGROUND_IMAGE,
    repeat: keys::BACKGROUND_REPEAT,
    size: None,
    step: None,
    position: None,
};

/// A component after layout.
#[derive(Debug)]
struct LayoutBox<'n> {
    node: &'n ComponentNode,
    style: Style,
    /// Border box in content space.
    bounds: Rect,
    content: Rect,
    text: Option<(Font, TextBlock)>,
    children: Vec<LayoutBox<'n>>,
    /// Whether the box advances its parent's flow.
    in_flow: bool,
    /// Bottom edge including the bottom margin.
    flow_bottom: f32,
}

pub struct DocumentRenderer<'a, M: TextMeasurer + ?Sized> {
    rules: &'a RuleSet,
    catalog: &'a FontCatalog,
    measurer: &'a M,
    options: RenderOptions,
    cascade: StyleCascade,
}

impl<'a, M: TextMeasurer + ?Sized> DocumentRenderer<'a, M> {
    pub fn new(rules: &'a RuleSet, catalog: &'a FontCatalog, measurer: &'a M) -> Self {
        Self {
            rules,
            catalog,
            measurer,
            options: RenderOptions::default(),
            cascade: StyleCascade::new(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The container size: the root's `page-size` or the configured default.
    pub fn page_size(&self, root: &ComponentNode) -> Result<Size, FolioError> {
        let style = StyleCascade::component_style(self.rules, root, ComponentState::Normal);
        let page = style.get(&keys::PAGE_SIZE)?.unwrap_or(self.options.page_size);
        let (width, height) = page.dimensions_pt();
        Ok(Size::new(width, height))
    }

    /// Renders `root` into `sink`, registering resources with `registry`, and
    /// returns the sink.
    pub fn render<S: OperatorSink>(
        &mut self,
        root: &ComponentNode,
        sink: S,
        registry: &mut dyn ResourceRegistry,
    ) -> Result<S, FolioError> {
        let page = self.page_size(root)?;
        log::debug!(
            "Rendering <{}> into a {}x{} container",
            root.type_tag,
            page.width,
            page.height
        );
        self.cascade = StyleCascade::new();
        let layout = self.layout(root, Rect::new(0.0, 0.0, page.width, page.height), 0.0)?;

        let mut emitter = ContentEmitter::new(sink, registry, page);
        self.paint(&layout, &mut emitter)?;
        let sink = emitter.finish()?;
        log::debug!("Wrote {} operators", sink.operation_count());
        Ok(sink)
    }

    // --- Layout ---

    fn layout<'n>(
        &mut self,
        node: &'n ComponentNode,
        container: Rect,
        cursor: f32,
    ) -> Result<LayoutBox<'n>, FolioError> {
        let own = StyleCascade::component_style(self.rules, node, ComponentState::Normal);
        self.cascade.push(own);
        let result = self.layout_current(node, container, cursor);
        self.cascade.pop();
        result
    }

    /// Lays out `node`, whose own style is the top cascade frame.
    fn layout_current<'n>(
        &mut self,
        node: &'n ComponentNode,
        container: Rect,
        cursor: f32,
    ) -> Result<LayoutBox<'n>, FolioError> {
        let style = self.cascade.full_style();
        let margin = thickness(&style, keys::MARGIN_ALL, [
            keys::MARGIN_TOP,
            keys::MARGIN_RIGHT,
            keys::MARGIN_BOTTOM,
            keys::MARGIN_LEFT,
        ])?;
        let padding = thickness(&style, keys::PADDING_ALL, [
            keys::PADDING_TOP,
            keys::PADDING_RIGHT,
            keys::PADDING_BOTTOM,
            keys::PADDING_LEFT,
        ])?;

        let position_y = style.get(&keys::POSITION_Y)?;
        let x = container.x + style.get(&keys::POSITION_X)?.unwrap_or(0.0) + margin.left;
        let y = match position_y {
            Some(offset) => container.y + offset,
            None => cursor,
        } + margin.top;

        let available = (container.right() - x - margin.right).max(0.0);
        let width = style
            .get(&keys::POSITION_WIDTH)?
            .and_then(|d| d.resolve(container.width))
            .unwrap_or(available);
        let explicit_height = style
            .get(&keys::POSITION_HEIGHT)?
            .and_then(|d| d.resolve(container.height));

        let content_x = x + padding.left;
        let content_y = y + padding.top;
        let content_width = (width - padding.left - padding.right).max(0.0);

        let text = match &node.content {
            ComponentContent::Text(text) => Some(self.measure(&style, text, content_width)?),
            _ => None,
        };
        let mut flow = content_y + text.as_ref().map_or(0.0, |(_, block)| block.height());
        if matches!(node.content, ComponentContent::Image(_)) && explicit_height.is_none() {
            // Without a height an image is drawn square.
            flow += content_width;
        }

        let inner_height = match explicit_height {
            Some(h) => h - padding.top - padding.bottom,
            None => container.bottom() - content_y,
        };
        let child_container = Rect::new(content_x, content_y, content_width, inner_height.max(0.0));
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let laid = self.layout(child, child_container, flow)?;
            if laid.in_flow {
                flow = flow.max(laid.flow_bottom);
            }
            children.push(laid);
        }

        let height = explicit_height.unwrap_or(flow - content_y + padding.top + padding.bottom);
        let bounds = Rect::new(x, y, width, height);
        log::trace!("Laid out <{}> at {:?}", node.type_tag, bounds);
        Ok(LayoutBox {
            node,
            content: Rect::new(
                content_x,
                content_y,
                content_width,
                (height - padding.top - padding.bottom).max(0.0),
            ),
            style,
            bounds,
            text,
            children,
            in_flow: position_y.is_none(),
            flow_bottom: y + height + margin.bottom,
        })
    }

    fn resolve_font(&self, style: &Style) -> Result<Font, FolioError> {
        let family = style
            .get(&keys::FONT_FAMILY)?
            .unwrap_or_else(|| self.options.default_font_family.clone());
        let size = style
            .get(&keys::FONT_SIZE)?
            .unwrap_or(self.options.default_font_size);
        let bold = style.get(&keys::FONT_BOLD)?.unwrap_or(false)
            || style.get(&keys::FONT_WEIGHT)?.is_some_and(|w| w.is_bold());
        let italic = style.get(&keys::FONT_ITALIC)?.unwrap_or(false)
            || style.get(&keys::FONT_STYLE)?.is_some_and(|s| s.is_italic());

        let mut flags = FontStyle::from_parts(bold, italic);
        flags.set(
            FontStyle::UNDERLINE,
            style.get(&keys::FONT_UNDERLINE)?.unwrap_or(false),
        );
        flags.set(
            FontStyle::STRIKEOUT,
            style.get(&keys::FONT_STRIKEOUT)?.unwrap_or(false),
        );
        let definition = self.catalog.resolve(&family, flags.face())?;
        Ok(Font::new(definition, size, flags))
    }

    fn measure(
        &self,
        style: &Style,
        text: &str,
        max_width: f32,
    ) -> Result<(Font, TextBlock), FolioError> {
        let font = self.resolve_font(style)?;
        let options = TextOptions {
            font_size: font.size,
            line_height: style
                .get(&keys::FONT_LINE_HEIGHT)?
                .unwrap_or(font.size * self.options.default_line_height),
            ascent: font.ascent(),
            max_width: Some(max_width),
            align: style.get(&keys::TEXT_ALIGN)?.unwrap_or(TextAlign::Left),
            first_line_inset: style.get(&keys::TEXT_INDENT)?.unwrap_or(0.0),
        };
        let block = self.measurer.measure(text, &options)?;
        Ok((font, block))
    }

    // --- Painting ---

    fn paint<S: OperatorSink>(
        &self,
        layout: &LayoutBox<'_>,
        emitter: &mut ContentEmitter<'_, S>,
    ) -> Result<(), FolioError> {
        let style = &layout.style;
        let clip = style.get(&keys::CLIP_ENABLED)?.unwrap_or(false)
            || style.get(&keys::OVERFLOW_HIDDEN)?.unwrap_or(false);
        let offset = style.get(&keys::TRANSFORM_OFFSET)?;
        let scoped = clip || offset.is_some();

        if scoped {
            emitter.save_state()?;
        }
        if let Some(offset) = offset {
            emitter.translate(offset.x, offset.y)?;
        }
        if clip {
            emitter.clip_rectangle(layout.bounds)?;
        }
        emitter.set_fill_rule(style.get(&keys::FILL_RULE)?.unwrap_or_default());
        emitter.reset_path_extent();
        let radius = style.get(&keys::BORDER_RADIUS)?.unwrap_or(0.0);

        let background = brush(style, &BACKGROUND_BRUSH)?;
        if !background.is_none() {
            background.set_up(emitter, layout.bounds)?;
            outline(emitter, layout.bounds, radius)?;
            emitter.fill_path()?;
            background.release(emitter, layout.bounds)?;
        }

        if let Some((font, block)) = &layout.text {
            let fill = match brush(style, &FILL_BRUSH)? {
                Brush::None => Brush::solid(ColorValue::BLACK),
                fill => fill,
            };
            fill.set_up(emitter, layout.content)?;
            emitter.set_current_font(font)?;
            emitter.fill_text(block, layout.content)?;
            fill.release(emitter, layout.content)?;
        }

        if let ComponentContent::Image(key) = &layout.node.content {
            emitter.paint_image(
                &ResourceKey::from(key.as_str()),
                layout.content.origin(),
                layout.content.size(),
            )?;
        }

        for child in &layout.children {
            self.paint(child, emitter)?;
        }

        let pen = pen(style)?;
        if !pen.is_none() {
            pen.set_up(emitter, layout.bounds)?;
            outline(emitter, layout.bounds, radius)?;
            emitter.stroke_path()?;
            pen.release(emitter, layout.bounds)?;
        }

        if scoped {
            emitter.restore_state()?;
        }
        Ok(())
    }
}

fn thickness(
    style: &Style,
    all: StyleKey<Thickness>,
    sides: [StyleKey<f32>; 4],
) -> Result<Thickness, StyleError> {
    let mut t = style.get(&all)?.unwrap_or_default();
    let [top, right, bottom, left] = sides;
    if let Some(v) = style.get(&top)? {
        t.top = v;
    }
    if let Some(v) = style.get(&right)? {
        t.right = v;
    }
    if let Some(v) = style.get(&bottom)? {
        t.bottom = v;
    }
    if let Some(v) = style.get(&left)? {
        t.left = v;
    }
    Ok(t)
}

/// An image set on the item makes a pattern brush; otherwise a color makes a
/// solid one.
fn brush(style: &Style, from: &BrushKeys) -> Result<Brush, StyleError> {
    let opacity = style.get(&from.opacity)?;
    if let Some(image) = style.get(&from.image)? {
        let mut fill = PatternFill::new(image);
        fill.repeat = style.get(&from.repeat)?.unwrap_or_default();
        fill.size = from.size.map(|k| style.get(&k)).transpose()?.flatten();
        fill.step = from.step.map(|k| style.get(&k)).transpose()?.flatten();
        if let Some(position) = from.position.map(|k| style.get(&k)).transpose()?.flatten() {
            fill.position = position;
        }
        fill.opacity = opacity;
        return Ok(Brush::Pattern(fill));
    }
    Ok(match style.get(&from.color)?.flatten() {
        Some(color) => Brush::Solid { color, opacity },
        None => Brush::None,
    })
}

/// The border pen. Only a component's own Border item draws a border; unset
/// values fall back to the inherited Stroke item, then to a 1pt black line.
fn pen(style: &Style) -> Result<Pen, StyleError> {
    if !style.has_kind(StyleKind::Border) {
        return Ok(Pen::None);
    }
    let border_style = style.get(&keys::BORDER_STYLE)?.unwrap_or_default();
    if border_style == BorderStyle::None {
        return Ok(Pen::None);
    }
    let color = match style.get(&keys::BORDER_COLOR)? {
        Some(explicit) => explicit,
        None => Some(
            style
                .get(&keys::STROKE_COLOR)?
                .flatten()
                .unwrap_or(ColorValue::BLACK),
        ),
    };
    let Some(color) = color else {
        return Ok(Pen::None);
    };
    let width = match style.get(&keys::BORDER_WIDTH)? {
        Some(width) => width,
        None => style.get(&keys::STROKE_WIDTH)?.unwrap_or(1.0),
    };
    if width <= 0.0 {
        return Ok(Pen::None);
    }

    let mut stroke = Stroke::new(color, width);
    stroke.cap = style.get(&keys::STROKE_CAP)?.unwrap_or_default();
    stroke.join = style.get(&keys::STROKE_JOIN)?.unwrap_or_default();
    stroke.miter_limit = style.get(&keys::STROKE_MITER)?.unwrap_or(10.0);
    stroke.opacity = style.get(&keys::STROKE_OPACITY)?;

    let dash = match style.get(&keys::BORDER_DASH)? {
        Some(dash) => Some(dash),
        None => match border_style {
            BorderStyle::Dashed => Some(DashPattern::new(vec![3.0 * width, 2.0 * width], 0.0)),
            BorderStyle::Dotted => Some(DashPattern::new(vec![width, width], 0.0)),
            _ => style.get(&keys::STROKE_DASH)?,
        },
    };
    Ok(match dash {
        Some(dash) if !dash.segments.is_empty() => Pen::Dash(stroke, dash),
        _ => Pen::Solid(stroke),
    })
}

/// Adds `r` to the current path, with corners rounded by `radius`.
fn outline<S: OperatorSink>(
    emitter: &mut ContentEmitter<'_, S>,
    r: Rect,
    radius: f32,
) -> Result<(), RenderError> {
    let radius = radius.min(r.width / 2.0).min(r.height / 2.0);
    if radius <= 0.0 {
        return emitter.rectangle(r);
    }
    let k = radius * KAPPA;
    let (left, top, right, bottom) = (r.x, r.y, r.right(), r.bottom());

    emitter.move_to(Point::new(left + radius, top))?;
    emitter.line_to(Point::new(right - radius, top))?;
    emitter.curve_to(
        Point::new(right - radius + k, top),
        Point::new(right, top + radius - k),
        Point::new(right, top + radius),
    )?;
    emitter.line_to(Point::new(right, bottom - radius))?;
    emitter.curve_to(
        Point::new(right, bottom - radius + k),
        Point::new(right - radius + k, bottom),
        Point::new(right - radius, bottom),
    )?;
    emitter.line_to(Point::new(left + radius, bottom))?;
    emitter.curve_to(
        Point::new(left + radius - k, bottom),
        Point::new(left, bottom - radius + k),
        Point::new(left, bottom - radius),
    )?;
    emitter.line_to(Point::new(left, top + radius))?;
    emitter.curve_to(
        Point::new(left, top + radius - k),
        Point::new(left + radius - k, top),
        Point::new(left + radius, top),
    )?;
    emitter.close_path()
}
