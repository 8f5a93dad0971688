use crate::brush::{Brush, PatternFill};
use crate::emitter::ContentEmitter;
use crate::font::Font;
use crate::pen::{Pen, Stroke};
use folio_fonts::{FontDefinition, FontStyle};
use folio_render_core::{Line, Paragraph, RenderError, Span, TextBlock};
use folio_resource::DocumentResources;
use folio_style::{DashPattern, FillRule, TextAlign};
use folio_traits::{ExtGStateParams, ResourceKind, ResourcePayload};
use folio_types::{ColorSpace, ColorValue, Point, Rect, ResourceKey, Size};
use lopdf::Object;
use lopdf::content::{Content, Operation};
use std::sync::Arc;
use tempfile::tempdir;

const PAGE: Size = Size {
    width: 600.0,
    height: 800.0,
};

fn ops(content: &Content) -> Vec<(String, Vec<Object>)> {
    content
        .operations
        .iter()
        .map(|Operation { operator, operands }| (operator.clone(), operands.clone()))
        .collect()
}

fn operators(content: &Content) -> Vec<&str> {
    content.operations.iter().map(|o| o.operator.as_str()).collect()
}

fn real(o: &Object) -> f32 {
    match o {
        Object::Real(r) => *r,
        Object::Integer(i) => *i as f32,
        other => panic!("not a number: {other:?}"),
    }
}

fn reals(operands: &[Object]) -> Vec<f32> {
    operands.iter().map(real).collect()
}

fn helvetica(size: f32, style: FontStyle) -> Font {
    Font::new(Arc::new(FontDefinition::helvetica()), size, style)
}

fn line(text: &str, width: f32) -> Line {
    Line {
        spans: vec![Span {
            text: text.to_string(),
            width,
        }],
        width,
        height: 14.0,
        ascent: 10.0,
    }
}

#[test]
fn test_rectangle_flips_y_with_height() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.rectangle(Rect::new(10.0, 100.0, 40.0, 50.0)).unwrap();
    emitter.move_to(Point::new(0.0, 0.0)).unwrap();
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    assert_eq!(ops[0].0, "re");
    assert_eq!(reals(&ops[0].1), vec![10.0, 650.0, 40.0, 50.0]);
    assert_eq!(ops[1].0, "m");
    assert_eq!(reals(&ops[1].1), vec![0.0, 800.0]);
}

#[test]
fn test_restore_without_save_fails() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    assert!(matches!(
        emitter.restore_state(),
        Err(RenderError::StateDiscipline(_))
    ));
}

#[test]
fn test_finish_rejects_unbalanced_save() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.save_state().unwrap();
    assert!(matches!(emitter.finish(), Err(RenderError::StateDiscipline(_))));
}

#[test]
fn test_color_operators_by_space() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_fill_color(&ColorValue::gray(0.5)).unwrap();
    emitter.set_stroke_color(&ColorValue::rgb(1.0, 0.0, 0.0)).unwrap();
    let err = emitter
        .set_fill_color(&ColorValue::Hsl {
            h: 0.0,
            s: 1.0,
            l: 0.5,
        })
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedColorSpace(ColorSpace::Hsl)));
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].0, "g");
    assert_eq!(ops[0].1.len(), 1);
    assert_eq!(ops[1].0, "RG");
    assert_eq!(reals(&ops[1].1), vec![1.0, 0.0, 0.0]);
}

#[test]
fn test_opacity_range_is_checked() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    assert!(matches!(emitter.set_fill_opacity(1.5), Err(RenderError::Argument(_))));
    assert!(matches!(emitter.set_stroke_opacity(-0.1), Err(RenderError::Argument(_))));
    assert!(matches!(emitter.set_fill_opacity(f32::NAN), Err(RenderError::Argument(_))));
}

#[test]
fn test_extgstate_carries_other_slot_and_resets_on_restore() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.save_state().unwrap();
    emitter.set_fill_opacity(0.5).unwrap();
    emitter.set_stroke_opacity(0.25).unwrap();
    let handle = emitter.state().ext_gstate.clone().unwrap();
    assert_eq!(
        handle.params,
        ExtGStateParams {
            fill_opacity: Some(0.5),
            stroke_opacity: Some(0.25),
        }
    );
    emitter.restore_state().unwrap();
    assert!(emitter.state().ext_gstate.is_none());
    emitter.set_fill_opacity(0.5).unwrap();
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    let names: Vec<_> = ops
        .iter()
        .filter(|(op, _)| op == "gs")
        .map(|(_, operands)| operands[0].clone())
        .collect();
    assert_eq!(operators(&content), vec!["q", "gs", "gs", "Q", "gs"]);
    assert_eq!(
        names,
        vec![
            Object::Name(b"GS1".to_vec()),
            Object::Name(b"GS2".to_vec()),
            Object::Name(b"GS1".to_vec()),
        ]
    );
    let gs: Vec<_> = registry.of_kind(ResourceKind::ExtGState).collect();
    assert_eq!(gs.len(), 2);
    assert_eq!(
        gs[0].resource.payload,
        ResourcePayload::ExtGState(ExtGStateParams {
            fill_opacity: Some(0.5),
            stroke_opacity: None,
        })
    );
    assert_eq!(gs[1].resource.payload, ResourcePayload::ExtGState(handle.params));
}

#[test]
fn test_nested_opacity_leaves_outer_state_untouched() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_fill_opacity(0.5).unwrap();
    emitter.save_state().unwrap();
    emitter.set_stroke_opacity(0.3).unwrap();
    emitter.restore_state().unwrap();
    emitter.finish().unwrap();

    let gs: Vec<_> = registry.of_kind(ResourceKind::ExtGState).collect();
    assert_eq!(gs.len(), 2);
    assert_eq!(gs[0].name.as_str(), "GS1");
    assert_eq!(
        gs[0].resource.payload,
        ResourcePayload::ExtGState(ExtGStateParams {
            fill_opacity: Some(0.5),
            stroke_opacity: None,
        })
    );
}

#[test]
fn test_emitters_sharing_a_registry_keep_distinct_states() {
    let mut registry = DocumentResources::in_current_dir();
    let mut first = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    first.set_fill_opacity(0.5).unwrap();
    first.finish().unwrap();
    let mut second = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    second.set_fill_opacity(0.9).unwrap();
    second.set_fill_opacity(0.5).unwrap();
    let content = second.finish().unwrap();

    let fills: Vec<_> = registry
        .of_kind(ResourceKind::ExtGState)
        .map(|entry| match &entry.resource.payload {
            ResourcePayload::ExtGState(params) => (entry.name.to_string(), params.fill_opacity),
            other => panic!("unexpected payload {other:?}"),
        })
        .collect();
    assert_eq!(
        fills,
        vec![("GS1".to_string(), Some(0.5)), ("GS2".to_string(), Some(0.9))]
    );
    assert_eq!(ops(&content)[1].1[0], Object::Name(b"GS1".to_vec()));
}

#[test]
fn test_changing_a_set_opacity_starts_a_new_state() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_stroke_opacity(0.4).unwrap();
    emitter.set_stroke_opacity(0.4).unwrap();
    emitter.set_stroke_opacity(0.8).unwrap();
    let content = emitter.finish().unwrap();
    assert_eq!(operators(&content), vec!["gs", "gs"]);
    assert_eq!(registry.of_kind(ResourceKind::ExtGState).count(), 2);
}

#[test]
fn test_path_extent_tracks_maxima_only() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.move_to(Point::new(50.0, 700.0)).unwrap();
    emitter.line_to(Point::new(120.0, 750.0)).unwrap();
    emitter
        .curve_to(Point::new(130.0, 760.0), Point::new(10.0, 790.0), Point::new(5.0, 795.0))
        .unwrap();
    let extent = emitter.path_extent();
    assert_eq!(extent.max_x, 130.0);
    assert_eq!(extent.max_y, 100.0);
    emitter.reset_path_extent();
    assert_eq!(emitter.path_extent().max_x, 0.0);
}

#[test]
fn test_curve_variants_and_fill_rules() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.move_to(Point::new(0.0, 0.0)).unwrap();
    emitter.curve_to_start_handle(Point::new(1.0, 1.0), Point::new(2.0, 2.0)).unwrap();
    emitter.curve_to_end_handle(Point::new(3.0, 3.0), Point::new(4.0, 4.0)).unwrap();
    emitter.close_path().unwrap();
    emitter.fill_path().unwrap();
    emitter.set_fill_rule(FillRule::EvenOdd);
    emitter.fill_path().unwrap();
    emitter.fill_and_stroke_path().unwrap();
    emitter.clip_rectangle(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    emitter.close_and_stroke().unwrap();
    emitter.stroke_path().unwrap();
    let content = emitter.finish().unwrap();
    assert_eq!(
        operators(&content),
        vec!["m", "y", "v", "h", "f", "f*", "B*", "re", "W*", "n", "s", "S"]
    );
    let ops = ops(&content);
    assert_eq!(reals(&ops[1].1), vec![1.0, 799.0, 2.0, 798.0]);
}

#[test]
fn test_translate_emits_cm_unless_pattern_is_active() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.translate(10.0, 20.0).unwrap();
    emitter.set_fill_pattern(&"P1".into()).unwrap();
    emitter.translate(5.0, 5.0).unwrap();
    emitter.move_to(Point::new(0.0, 0.0)).unwrap();
    emitter.clear_fill_pattern();
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    assert_eq!(ops[0].0, "cm");
    assert_eq!(reals(&ops[0].1), vec![1.0, 0.0, 0.0, 1.0, 10.0, -20.0]);
    assert_eq!(ops[1].0, "cs");
    assert_eq!(ops[2].0, "scn");
    assert_eq!(ops[3].0, "m");
    assert_eq!(reals(&ops[3].1), vec![5.0, 795.0]);
}

#[test]
fn test_font_is_registered_once() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_current_font(&helvetica(12.0, FontStyle::REGULAR)).unwrap();
    emitter.set_current_font(&helvetica(9.0, FontStyle::BOLD)).unwrap();
    emitter.set_font_size(20.0).unwrap();
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    assert_eq!(ops.len(), 3);
    for (op, size) in ops.iter().zip([12.0, 9.0, 20.0]) {
        assert_eq!(op.0, "Tf");
        assert_eq!(op.1[0], Object::Name(b"F1".to_vec()));
        assert_eq!(real(&op.1[1]), size);
    }
    assert_eq!(registry.of_kind(ResourceKind::Font).count(), 1);
}

#[test]
fn test_restore_brings_back_the_outer_font() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_current_font(&helvetica(12.0, FontStyle::REGULAR)).unwrap();
    emitter.save_state().unwrap();
    emitter.set_current_font(&helvetica(20.0, FontStyle::UNDERLINE)).unwrap();
    assert!(emitter.current_font().unwrap().underlined());
    emitter.restore_state().unwrap();

    let font = emitter.current_font().unwrap();
    assert_eq!(font.size, 12.0);
    assert!(!font.underlined());
    emitter.finish().unwrap();
}

#[test]
fn test_fill_text_left_aligned_positions() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter.set_current_font(&helvetica(12.0, FontStyle::REGULAR)).unwrap();
    let block = TextBlock {
        paragraphs: vec![
            Paragraph {
                lines: vec![line("first", 50.0), line("second", 40.0)],
            },
            Paragraph {
                lines: vec![line("third", 30.0)],
            },
        ],
        align: TextAlign::Left,
        first_line_inset: 8.0,
    };
    emitter
        .fill_text(&block, Rect::new(20.0, 100.0, 200.0, 100.0))
        .unwrap();
    let content = emitter.finish().unwrap();

    let tds: Vec<Vec<f32>> = ops(&content)
        .into_iter()
        .filter(|(op, _)| op == "Td")
        .map(|(_, operands)| reals(&operands))
        .collect();
    assert_eq!(tds[0], vec![28.0, 690.0]);
    assert_eq!(tds[1], vec![-8.0, -14.0]);
    assert_eq!(tds[2], vec![8.0, -14.0]);
    assert_eq!(
        operators(&content),
        vec!["Tf", "BT", "Td", "Tj", "Td", "Tj", "Td", "Tj", "ET"]
    );
}

#[test]
fn test_fill_text_right_and_center() {
    for (align, expected) in [
        (TextAlign::Right, vec![vec![150.0, 690.0], vec![20.0, -14.0]]),
        (TextAlign::Center, vec![vec![75.0, 690.0], vec![10.0, -14.0]]),
    ] {
        let mut registry = DocumentResources::in_current_dir();
        let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
        emitter.set_current_font(&helvetica(12.0, FontStyle::REGULAR)).unwrap();
        let block = TextBlock {
            paragraphs: vec![Paragraph {
                lines: vec![line("wide", 50.0), line("thin", 30.0)],
            }],
            align,
            first_line_inset: 0.0,
        };
        emitter
            .fill_text(&block, Rect::new(0.0, 100.0, 200.0, 50.0))
            .unwrap();
        let content = emitter.finish().unwrap();
        let tds: Vec<Vec<f32>> = ops(&content)
            .into_iter()
            .filter(|(op, _)| op == "Td")
            .map(|(_, operands)| reals(&operands))
            .collect();
        assert_eq!(tds, expected, "{align:?}");
    }
}

#[test]
fn test_fill_text_requires_font() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    let block = TextBlock {
        paragraphs: vec![Paragraph {
            lines: vec![line("x", 5.0)],
        }],
        ..Default::default()
    };
    assert!(matches!(
        emitter.fill_text(&block, Rect::new(0.0, 0.0, 10.0, 10.0)),
        Err(RenderError::Argument(_))
    ));
}

#[test]
fn test_underline_is_drawn_after_text() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter
        .set_current_font(&helvetica(18.0, FontStyle::UNDERLINE | FontStyle::STRIKEOUT))
        .unwrap();
    let block = TextBlock {
        paragraphs: vec![Paragraph {
            lines: vec![line("under", 60.0)],
        }],
        ..Default::default()
    };
    emitter.fill_text(&block, Rect::new(0.0, 0.0, 100.0, 20.0)).unwrap();
    let content = emitter.finish().unwrap();
    assert_eq!(
        operators(&content),
        vec!["Tf", "BT", "Td", "Tj", "ET", "re", "re", "f"]
    );
}

#[test]
fn test_paint_image_wraps_transform() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("logo.png"), b"png").unwrap();
    let mut registry = DocumentResources::new(dir.path());
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    emitter
        .paint_image(&ResourceKey::from("logo.png"), Point::new(10.0, 20.0), Size::new(100.0, 50.0))
        .unwrap();
    let content = emitter.finish().unwrap();

    let ops = ops(&content);
    assert_eq!(operators(&content), vec!["q", "cm", "Do", "Q"]);
    assert_eq!(reals(&ops[1].1), vec![100.0, 0.0, 0.0, 50.0, 10.0, 730.0]);
    assert_eq!(ops[2].1[0], Object::Name(b"Img1".to_vec()));
}

#[test]
fn test_solid_brush_and_dashed_pen() {
    let mut registry = DocumentResources::in_current_dir();
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    let brush = Brush::Solid {
        color: ColorValue::rgb(0.0, 0.0, 1.0),
        opacity: Some(0.5),
    };
    brush.set_up(&mut emitter, bounds).unwrap();
    emitter.rectangle(bounds).unwrap();
    emitter.fill_path().unwrap();
    brush.release(&mut emitter, bounds).unwrap();

    let pen = Pen::Dash(
        Stroke::new(ColorValue::BLACK, 2.0),
        DashPattern::new(vec![3.0, 2.0], 0.0),
    );
    pen.set_up(&mut emitter, bounds).unwrap();
    emitter.rectangle(bounds).unwrap();
    emitter.stroke_path().unwrap();
    pen.release(&mut emitter, bounds).unwrap();
    let content = emitter.finish().unwrap();

    assert_eq!(
        operators(&content),
        vec![
            "q", "rg", "gs", "re", "f", "Q", "q", "G", "w", "J", "j", "M", "d", "re", "S", "Q"
        ]
    );
}

#[test]
fn test_pattern_brush_registers_tiling_pattern() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tile.png"), b"png").unwrap();
    let mut registry = DocumentResources::new(dir.path());
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    let bounds = Rect::new(10.0, 100.0, 200.0, 100.0);
    let mut fill = PatternFill::new("tile.png");
    fill.size = Some(Size::new(20.0, 10.0));
    let brush = Brush::Pattern(fill);
    brush.set_up(&mut emitter, bounds).unwrap();
    assert!(emitter.state().pattern_active);
    emitter.rectangle(bounds).unwrap();
    emitter.fill_path().unwrap();
    brush.release(&mut emitter, bounds).unwrap();
    assert!(!emitter.state().pattern_active);
    emitter.finish().unwrap();

    let patterns: Vec<_> = registry.of_kind(ResourceKind::Pattern).collect();
    assert_eq!(patterns.len(), 1);
    match &patterns[0].resource.payload {
        ResourcePayload::Pattern(p) => {
            assert_eq!(p.image.as_str(), "Img1");
            assert_eq!(p.matrix, [1.0, 0.0, 0.0, 1.0, 10.0, 690.0]);
            assert_eq!(p.step, Size::new(20.0, 10.0));
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn test_pattern_origin_follows_emitted_translation() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("tile.png"), b"png").unwrap();
    let mut registry = DocumentResources::new(dir.path());
    let mut emitter = ContentEmitter::new(Content { operations: vec![] }, &mut registry, PAGE);
    let bounds = Rect::new(10.0, 100.0, 200.0, 100.0);
    let mut fill = PatternFill::new("tile.png");
    fill.size = Some(Size::new(20.0, 10.0));
    let brush = Brush::Pattern(fill);

    emitter.save_state().unwrap();
    emitter.translate(5.0, 5.0).unwrap();
    brush.set_up(&mut emitter, bounds).unwrap();
    brush.release(&mut emitter, bounds).unwrap();
    emitter.restore_state().unwrap();
    emitter.finish().unwrap();

    let pattern = registry
        .of_kind(ResourceKind::Pattern)
        .find_map(|entry| match &entry.resource.payload {
            ResourcePayload::Pattern(p) => Some(p.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(pattern.matrix, [1.0, 0.0, 0.0, 1.0, 15.0, 685.0]);
}
