//! The content-stream emitter.

use crate::font::Font;
use crate::state::{ExtGStateHandle, GraphicsState, GraphicsStateStack, SelectedFont};
use folio_render_core::utils::{flip_y, flip_y_with_height};
use folio_render_core::{OperatorSink, RenderError};
use folio_style::{DashPattern, FillRule, LineCap, LineJoin};
use folio_traits::{Resource, ResourceKind, ResourcePayload, ResourceRegistry};
use folio_types::{ColorValue, Point, Rect, ResourceKey, ResourceName, Size};
use lopdf::content::Operation;
use lopdf::Object;

/// Running extent of the points emitted for the current path, in device
/// space. Only maxima are tracked and both start at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PathExtent {
    pub max_x: f32,
    pub max_y: f32,
}

impl PathExtent {
    fn include(&mut self, x: f32, y: f32) {
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Fill,
    Stroke,
}

/// Writes drawing, text and image operators for one container.
///
/// Callers work in content space (origin top-left, y down). Every point is
/// converted to device space (origin bottom-left) with `H - y`, or
/// `H - y - h` for boxes, where `H` is the container height.
pub struct ContentEmitter<'r, S: OperatorSink> {
    sink: S,
    registry: &'r mut dyn ResourceRegistry,
    container: Size,
    state: GraphicsStateStack,
    extent: PathExtent,
    fill_rule: FillRule,
    in_text: bool,
}

impl<'r, S: OperatorSink> ContentEmitter<'r, S> {
    pub fn new(sink: S, registry: &'r mut dyn ResourceRegistry, container: Size) -> Self {
        Self {
            sink,
            registry,
            container,
            state: GraphicsStateStack::default(),
            extent: PathExtent::default(),
            fill_rule: FillRule::NonZero,
            in_text: false,
        }
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn registry(&mut self) -> &mut dyn ResourceRegistry {
        &mut *self.registry
    }

    pub fn state(&self) -> &GraphicsState {
        self.state.current()
    }

    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    pub fn path_extent(&self) -> PathExtent {
        self.extent
    }

    pub fn reset_path_extent(&mut self) {
        self.extent = PathExtent::default();
    }

    pub fn current_font(&self) -> Option<&Font> {
        self.state.current().font.as_ref().map(|selected| &selected.font)
    }

    /// Checks that every save was restored and every text object closed,
    /// then hands back the sink.
    pub fn finish(self) -> Result<S, RenderError> {
        if self.state.depth() != 0 {
            return Err(RenderError::StateDiscipline(format!(
                "{} saved state(s) never restored",
                self.state.depth()
            )));
        }
        if self.in_text {
            return Err(RenderError::StateDiscipline(
                "text object never ended".to_string(),
            ));
        }
        Ok(self.sink)
    }

    pub(crate) fn op(&mut self, operator: &str, operands: Vec<Object>) -> Result<(), RenderError> {
        self.sink.push(Operation::new(operator, operands))
    }

    // --- Coordinates ---

    pub fn device_x(&self, x: f32) -> f32 {
        x + self.state.current().offset.x
    }

    pub fn device_y(&self, y: f32) -> f32 {
        flip_y(y + self.state.current().offset.y, self.container.height)
    }

    pub fn device_y_with_height(&self, y: f32, height: f32) -> f32 {
        flip_y_with_height(
            y + self.state.current().offset.y,
            height,
            self.container.height,
        )
    }

    fn device_point(&mut self, p: Point) -> (f32, f32) {
        let (x, y) = (self.device_x(p.x), self.device_y(p.y));
        self.extent.include(x, y);
        (x, y)
    }

    // --- State ---

    pub fn save_state(&mut self) -> Result<(), RenderError> {
        self.state.save();
        self.op("q", vec![])
    }

    pub fn restore_state(&mut self) -> Result<(), RenderError> {
        self.state.restore()?;
        self.op("Q", vec![])
    }

    /// Shifts subsequent drawing by `(dx, dy)` in content space.
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), RenderError> {
        if self.state.current().pattern_active {
            let offset = &mut self.state.current_mut().offset;
            offset.x += dx;
            offset.y += dy;
            return Ok(());
        }
        self.op(
            "cm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), dx.into(), (-dy).into()],
        )?;
        let ctm = &mut self.state.current_mut().ctm_translation;
        ctm.x += dx;
        ctm.y -= dy;
        Ok(())
    }

    /// Pattern-space position of the bottom-left corner of a box of height `h`
    /// at content-space `(x, y)`. Pattern space ignores `cm`, so emitted
    /// translations are added back.
    pub fn pattern_origin(&self, x: f32, y: f32, h: f32) -> (f32, f32) {
        let ctm = self.state.current().ctm_translation;
        (
            self.device_x(x) + ctm.x,
            self.device_y_with_height(y, h) + ctm.y,
        )
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    // --- Color ---

    pub fn set_fill_color(&mut self, color: &ColorValue) -> Result<(), RenderError> {
        self.set_color(color, Slot::Fill)
    }

    pub fn set_stroke_color(&mut self, color: &ColorValue) -> Result<(), RenderError> {
        self.set_color(color, Slot::Stroke)
    }

    fn set_color(&mut self, color: &ColorValue, slot: Slot) -> Result<(), RenderError> {
        let (operator, operands): (&str, Vec<Object>) = match (color, slot) {
            (ColorValue::Gray(v), Slot::Fill) => ("g", vec![(*v).into()]),
            (ColorValue::Gray(v), Slot::Stroke) => ("G", vec![(*v).into()]),
            (ColorValue::Rgb { r, g, b }, Slot::Fill) => {
                ("rg", vec![(*r).into(), (*g).into(), (*b).into()])
            }
            (ColorValue::Rgb { r, g, b }, Slot::Stroke) => {
                ("RG", vec![(*r).into(), (*g).into(), (*b).into()])
            }
            (other, _) => return Err(RenderError::UnsupportedColorSpace(other.space())),
        };
        self.op(operator, operands)
    }

    pub fn set_fill_opacity(&mut self, opacity: f32) -> Result<(), RenderError> {
        self.set_opacity(opacity, Slot::Fill)
    }

    pub fn set_stroke_opacity(&mut self, opacity: f32) -> Result<(), RenderError> {
        self.set_opacity(opacity, Slot::Stroke)
    }

    /// Applies an opacity through an extended graphics state.
    ///
    /// The state carries forward the other slot of the handle in effect.
    /// Handles are keyed by their parameters, so one registry shares them
    /// across emitters and an applied handle is never rewritten.
    fn set_opacity(&mut self, opacity: f32, slot: Slot) -> Result<(), RenderError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(RenderError::Argument(format!(
                "opacity {opacity} is outside [0, 1]"
            )));
        }

        let current = self.state.current().ext_gstate.as_ref().map(|h| h.params);
        let mut params = current.unwrap_or_default();
        match slot {
            Slot::Fill => params.fill_opacity = Some(opacity),
            Slot::Stroke => params.stroke_opacity = Some(opacity),
        }
        if current == Some(params) {
            return Ok(());
        }

        let key = ResourceKey::from(format!(
            "gs:f={};s={}",
            opacity_key(params.fill_opacity),
            opacity_key(params.stroke_opacity)
        ));
        let name = match self.registry.resolve(ResourceKind::ExtGState, &key) {
            Some(existing) => existing.name.clone(),
            None => {
                let name = self
                    .registry
                    .register(Resource::new(key.clone(), ResourcePayload::ExtGState(params)))?;
                log::trace!("Created extended graphics state /{} ({:?})", name, params);
                name
            }
        };
        self.op("gs", vec![Object::Name(name.as_bytes().to_vec())])?;
        self.state.current_mut().ext_gstate = Some(ExtGStateHandle { key, name, params });
        Ok(())
    }

    /// Selects a registered pattern as the fill color.
    pub fn set_fill_pattern(&mut self, pattern: &ResourceName) -> Result<(), RenderError> {
        log::debug!("Selecting fill pattern /{}", pattern);
        self.op("cs", vec![Object::Name(b"Pattern".to_vec())])?;
        self.op("scn", vec![Object::Name(pattern.as_bytes().to_vec())])?;
        self.state.current_mut().pattern_active = true;
        Ok(())
    }

    pub fn clear_fill_pattern(&mut self) {
        self.state.current_mut().pattern_active = false;
    }

    // --- Line style ---

    pub fn set_line_width(&mut self, width: f32) -> Result<(), RenderError> {
        if width < 0.0 {
            return Err(RenderError::Argument(format!("negative line width {width}")));
        }
        self.op("w", vec![width.into()])
    }

    pub fn set_line_cap(&mut self, cap: LineCap) -> Result<(), RenderError> {
        self.op("J", vec![cap.operand().into()])
    }

    pub fn set_line_join(&mut self, join: LineJoin) -> Result<(), RenderError> {
        self.op("j", vec![join.operand().into()])
    }

    pub fn set_miter_limit(&mut self, limit: f32) -> Result<(), RenderError> {
        if limit < 1.0 {
            return Err(RenderError::Argument(format!("miter limit {limit} is below 1")));
        }
        self.op("M", vec![limit.into()])
    }

    pub fn set_dash(&mut self, dash: &DashPattern) -> Result<(), RenderError> {
        let segments = dash.segments.iter().map(|s| Object::Real(*s)).collect();
        self.op("d", vec![Object::Array(segments), dash.phase.into()])
    }

    pub fn clear_dash(&mut self) -> Result<(), RenderError> {
        self.op("d", vec![Object::Array(vec![]), 0.into()])
    }

    // --- Paths ---

    pub fn move_to(&mut self, p: Point) -> Result<(), RenderError> {
        let (x, y) = self.device_point(p);
        self.op("m", vec![x.into(), y.into()])
    }

    pub fn line_to(&mut self, p: Point) -> Result<(), RenderError> {
        let (x, y) = self.device_point(p);
        self.op("l", vec![x.into(), y.into()])
    }

    /// Cubic Bézier with both control points.
    pub fn curve_to(&mut self, c1: Point, c2: Point, end: Point) -> Result<(), RenderError> {
        let (x1, y1) = self.device_point(c1);
        let (x2, y2) = self.device_point(c2);
        let (x3, y3) = self.device_point(end);
        self.op(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        )
    }

    /// Cubic Bézier whose second control point is the end point.
    pub fn curve_to_start_handle(&mut self, c1: Point, end: Point) -> Result<(), RenderError> {
        let (x1, y1) = self.device_point(c1);
        let (x3, y3) = self.device_point(end);
        self.op("y", vec![x1.into(), y1.into(), x3.into(), y3.into()])
    }

    /// Cubic Bézier whose first control point is the current point.
    pub fn curve_to_end_handle(&mut self, c2: Point, end: Point) -> Result<(), RenderError> {
        let (x2, y2) = self.device_point(c2);
        let (x3, y3) = self.device_point(end);
        self.op("v", vec![x2.into(), y2.into(), x3.into(), y3.into()])
    }

    pub fn close_path(&mut self) -> Result<(), RenderError> {
        self.op("h", vec![])
    }

    pub fn rectangle(&mut self, rect: Rect) -> Result<(), RenderError> {
        let x = self.device_x(rect.x);
        let y = self.device_y_with_height(rect.y, rect.height);
        self.extent.include(x, y);
        self.extent.include(x + rect.width, y + rect.height);
        self.op(
            "re",
            vec![x.into(), y.into(), rect.width.into(), rect.height.into()],
        )
    }

    /// Intersects the clipping path with `rect`.
    pub fn clip_rectangle(&mut self, rect: Rect) -> Result<(), RenderError> {
        self.rectangle(rect)?;
        let clip = match self.fill_rule {
            FillRule::NonZero => "W",
            FillRule::EvenOdd => "W*",
        };
        self.op(clip, vec![])?;
        self.op("n", vec![])
    }

    pub fn fill_path(&mut self) -> Result<(), RenderError> {
        let op = match self.fill_rule {
            FillRule::NonZero => "f",
            FillRule::EvenOdd => "f*",
        };
        self.op(op, vec![])
    }

    pub fn stroke_path(&mut self) -> Result<(), RenderError> {
        self.op("S", vec![])
    }

    pub fn close_and_stroke(&mut self) -> Result<(), RenderError> {
        self.op("s", vec![])
    }

    pub fn fill_and_stroke_path(&mut self) -> Result<(), RenderError> {
        let op = match self.fill_rule {
            FillRule::NonZero => "B",
            FillRule::EvenOdd => "B*",
        };
        self.op(op, vec![])
    }

    // --- Text ---

    pub fn begin_text(&mut self) -> Result<(), RenderError> {
        if self.in_text {
            return Err(RenderError::StateDiscipline(
                "text objects cannot nest".to_string(),
            ));
        }
        self.in_text = true;
        self.op("BT", vec![])
    }

    pub fn end_text(&mut self) -> Result<(), RenderError> {
        if !self.in_text {
            return Err(RenderError::StateDiscipline(
                "end of text without a begin".to_string(),
            ));
        }
        self.in_text = false;
        self.op("ET", vec![])
    }

    pub fn in_text(&self) -> bool {
        self.in_text
    }

    /// Registers the font if needed and selects it with `Tf`.
    pub fn set_current_font(&mut self, font: &Font) -> Result<(), RenderError> {
        let resource = font.resource();
        let name = match self.registry.resolve(ResourceKind::Font, &resource.key) {
            Some(existing) => existing.name.clone(),
            None => self.registry.register(resource)?,
        };
        self.select_font(name, font.clone())
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<(), RenderError> {
        let SelectedFont { name, mut font } = self
            .state
            .current()
            .font
            .clone()
            .ok_or_else(|| RenderError::Argument("no font selected".to_string()))?;
        font.size = size;
        self.select_font(name, font)
    }

    fn select_font(&mut self, name: ResourceName, font: Font) -> Result<(), RenderError> {
        if font.size <= 0.0 {
            return Err(RenderError::Argument(format!(
                "font size {} must be positive",
                font.size
            )));
        }
        self.op(
            "Tf",
            vec![Object::Name(name.as_bytes().to_vec()), font.size.into()],
        )?;
        self.state.current_mut().font = Some(SelectedFont { name, font });
        Ok(())
    }

    // --- Images ---

    /// Name of the image resource for `key`, registering it (with its path
    /// mapped through the registry) on first use.
    pub fn image_name(&mut self, key: &ResourceKey) -> Result<ResourceName, RenderError> {
        if let Some(existing) = self.registry.resolve(ResourceKind::Image, key) {
            return Ok(existing.name.clone());
        }
        let path = self.registry.map_path(key.as_str())?;
        Ok(self
            .registry
            .register(Resource::new(key.clone(), ResourcePayload::Image { path }))?)
    }

    /// Paints an image scaled to `size` with its top-left corner at `position`.
    pub fn paint_image(
        &mut self,
        image: &ResourceKey,
        position: Point,
        size: Size,
    ) -> Result<(), RenderError> {
        let name = self.image_name(image)?;
        let x = self.device_x(position.x);
        let y = self.device_y_with_height(position.y, size.height);
        self.save_state()?;
        self.op(
            "cm",
            vec![
                size.width.into(),
                0.into(),
                0.into(),
                size.height.into(),
                x.into(),
                y.into(),
            ],
        )?;
        self.op("Do", vec![Object::Name(name.as_bytes().to_vec())])?;
        self.restore_state()
    }
}

fn opacity_key(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
