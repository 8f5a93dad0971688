mod common;

use common::{
    TestResult, assert_close, isolated_catalog, number, numbers, render_json, render_with, small_page,
};
use folio::FolioError;
use folio::fonts::{FontCatalog, FontConfig, FontError};
use folio::render::RenderError;
use folio::traits::{ResourceError, ResourceKind, ResourcePayload};
use folio::types::ColorSpace;
use lopdf::Object;
use tempfile::tempdir;

#[test]
fn test_boxes_are_flipped_into_device_space() -> TestResult {
    let out = render_json(
        r#"{ "root": {
            "type": "page",
            "style": "position-height: 100%; background-color: red",
            "children": [
                { "type": "box",
                  "style": "position-x: 10; position-y: 20; position-width: 50; position-height: 30; background-color: #00f" }
            ]
        } }"#,
    )?;

    let rects = out.find("re");
    assert_eq!(rects.len(), 2);
    assert_close(&numbers(rects[0]), &[0.0, 0.0, 200.0, 100.0]);
    assert_close(&numbers(rects[1]), &[10.0, 50.0, 50.0, 30.0]);
    assert_eq!(
        out.operators(),
        vec!["q", "rg", "re", "f", "Q", "q", "rg", "re", "f", "Q"]
    );
    assert_close(&numbers(out.find("rg")[1]), &[0.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn test_children_flow_below_each_other() -> TestResult {
    let out = render_json(
        r#"{ "root": {
            "type": "page",
            "style": "padding: 5",
            "children": [
                { "type": "box", "style": "position-height: 20; background-color: black" },
                { "type": "box", "style": "position-height: 10; margin-top: 4; background-color: black" }
            ]
        } }"#,
    )?;
    let rects = out.find("re");
    // First box: y 5..25, second: y 29..39.
    assert_close(&numbers(rects[0]), &[5.0, 75.0, 190.0, 20.0]);
    assert_close(&numbers(rects[1]), &[5.0, 61.0, 190.0, 10.0]);
    Ok(())
}

#[test]
fn test_text_is_positioned_at_the_first_baseline() -> TestResult {
    let out = render_json(
        r#"{ "root": { "type": "p", "style": "font-size: 10; fill-color: red", "content": { "text": "Hello" } } }"#,
    )?;

    assert_eq!(
        out.operators(),
        vec!["q", "rg", "Tf", "BT", "Td", "Tj", "ET", "Q"]
    );
    let tf = out.find("Tf")[0];
    assert_eq!(tf.operands[0], Object::Name(b"F1".to_vec()));
    assert_close(&numbers(out.find("Td")[0]), &[0.0, 100.0 - 7.18]);
    match &out.find("Tj")[0].operands[0] {
        Object::String(bytes, _) => assert_eq!(bytes, b"Hello"),
        other => panic!("unexpected operand {other:?}"),
    }
    let fonts: Vec<_> = out.registry.of_kind(ResourceKind::Font).collect();
    assert_eq!(fonts.len(), 1);
    assert!(matches!(
        &fonts[0].resource.payload,
        ResourcePayload::Font { base_font, program: None } if base_font == "Helvetica"
    ));
    Ok(())
}

#[test]
fn test_text_defaults_to_black_and_wraps() -> TestResult {
    // 10pt text advances 5pt per character; 200pt lines hold 40 characters.
    let words = "word ".repeat(12);
    let json = format!(
        r#"{{ "root": {{ "type": "p", "style": "font-size: 10; font-line-height: 12", "content": {{ "text": "{}" }} }} }}"#,
        words.trim()
    );
    let out = render_json(&json)?;
    assert_close(&numbers(out.find("g")[0]), &[0.0]);
    let tds = out.find("Td");
    assert_eq!(tds.len(), 2);
    assert_close(&numbers(tds[1]), &[0.0, -12.0]);
    Ok(())
}

#[test]
fn test_escaped_text_round_trips() -> TestResult {
    let out = render_json(
        r#"{ "root": { "type": "p", "content": { "text": "a(b)\\c" } } }"#,
    )?;
    let raw = String::from_utf8_lossy(&out.bytes);
    assert!(raw.contains(r"(a\(b\)\\c) Tj"), "{raw}");
    match &out.find("Tj")[0].operands[0] {
        Object::String(bytes, _) => assert_eq!(bytes, br"a(b)\c"),
        other => panic!("unexpected operand {other:?}"),
    }
    Ok(())
}

#[test]
fn test_inherited_fill_reaches_children_but_border_does_not() -> TestResult {
    let out = render_json(
        r#"{ "root": {
            "type": "section",
            "style": "fill-color: #ff0000; border-color: blue; border-width: 2; position-height: 50",
            "children": [ { "type": "p", "content": { "text": "child" } } ]
        } }"#,
    )?;
    // The child's text picks up the inherited fill.
    assert_close(&numbers(out.find("rg")[0]), &[1.0, 0.0, 0.0]);
    // Only the section strokes a border.
    assert_eq!(out.count("S"), 1);
    assert_close(&numbers(out.find("RG")[0]), &[0.0, 0.0, 1.0]);
    assert_close(&numbers(out.find("w")[0]), &[2.0]);
    Ok(())
}

#[test]
fn test_last_matching_rule_wins_and_inline_beats_rules() -> TestResult {
    let out = render_json(
        r#"{
            "rules": [
                { "type": "p", "style": "fill-color: red" },
                { "class": "note", "style": "fill-color: blue" },
                { "class": "other", "style": "fill-color: gray" }
            ],
            "root": {
                "type": "page",
                "children": [
                    { "type": "p", "class": "note wide", "content": { "text": "a" } },
                    { "type": "p", "class": "note", "style": "fill-color: white", "content": { "text": "b" } }
                ]
            }
        }"#,
    )?;
    let fills = out.find("rg");
    assert_close(&numbers(fills[0]), &[0.0, 0.0, 1.0]);
    assert_close(&numbers(fills[1]), &[1.0, 1.0, 1.0]);
    Ok(())
}

#[test]
fn test_rounded_and_dashed_border() -> TestResult {
    let out = render_json(
        r#"{ "root": { "type": "box",
            "style": "position-width: 40; position-height: 20; border-style: dashed; border-width: 2; border-radius: 5" } }"#,
    )?;
    assert_eq!(out.count("c"), 4);
    assert_eq!(out.count("h"), 1);
    let dash = out.find("d")[0];
    match &dash.operands[0] {
        Object::Array(items) => {
            let segments: Vec<f32> = items.iter().map(number).collect();
            assert_close(&segments, &[6.0, 4.0]);
        }
        other => panic!("unexpected dash operand {other:?}"),
    }
    assert_eq!(out.count("q"), out.count("Q"));
    Ok(())
}

#[test]
fn test_background_opacity_uses_an_extended_state() -> TestResult {
    let out = render_json(
        r#"{ "root": { "type": "box", "style": "position-height: 10; background-color: black; background-opacity: 50%" } }"#,
    )?;
    assert_eq!(out.operators(), vec!["q", "g", "gs", "re", "f", "Q"]);
    let states: Vec<_> = out.registry.of_kind(ResourceKind::ExtGState).collect();
    assert_eq!(states.len(), 1);
    match &states[0].resource.payload {
        ResourcePayload::ExtGState(params) => assert_eq!(params.fill_opacity, Some(0.5)),
        other => panic!("unexpected payload {other:?}"),
    }
    Ok(())
}

#[test]
fn test_background_image_becomes_a_tiling_pattern() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("tile.png"), b"png")?;
    let out = render_with(
        r#"{ "root": { "type": "box", "style": "position-height: 40; background-image: tile.png; background-repeat: repeat-x" } }"#,
        &isolated_catalog(),
        small_page(),
        dir.path(),
    )?;
    assert_eq!(out.operators(), vec!["q", "cs", "scn", "re", "f", "Q"]);
    let patterns: Vec<_> = out.registry.of_kind(ResourceKind::Pattern).collect();
    assert_eq!(patterns.len(), 1);
    match &patterns[0].resource.payload {
        ResourcePayload::Pattern(tiling) => {
            assert_eq!(tiling.tile.width, 200.0);
            assert_eq!(tiling.tile.height, 40.0);
            // Repeating along x only: the vertical step clears the box.
            assert_eq!(tiling.step.height, 80.0);
            assert_eq!(tiling.matrix[5], 60.0);
        }
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(out.registry.of_kind(ResourceKind::Image).count(), 1);
    Ok(())
}

#[test]
fn test_background_pattern_follows_transform_offset() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("tile.png"), b"png")?;
    let out = render_with(
        r#"{ "root": { "type": "box",
            "style": "position-height: 40; transform-offset: 5 5; background-image: tile.png" } }"#,
        &isolated_catalog(),
        small_page(),
        dir.path(),
    )?;
    assert_close(&numbers(out.find("cm")[0]), &[1.0, 0.0, 0.0, 1.0, 5.0, -5.0]);
    assert_close(&numbers(out.find("re")[0]), &[0.0, 60.0, 200.0, 40.0]);
    let tiling = out
        .registry
        .of_kind(ResourceKind::Pattern)
        .find_map(|entry| match &entry.resource.payload {
            ResourcePayload::Pattern(tiling) => Some(tiling.clone()),
            _ => None,
        })
        .expect("pattern registered");
    // Pattern space ignores `cm`, so the tile origin carries the offset.
    assert_close(&tiling.matrix[4..], &[5.0, 55.0]);
    Ok(())
}

#[test]
fn test_image_is_painted_with_a_scaling_transform() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("logo.png"), b"png")?;
    let out = render_with(
        r#"{ "root": { "type": "img", "style": "position-x: 10; position-y: 10; position-width: 30; position-height: 20",
                       "content": { "image": "logo.png" } } }"#,
        &isolated_catalog(),
        small_page(),
        dir.path(),
    )?;
    assert_eq!(out.operators(), vec!["q", "cm", "Do", "Q"]);
    assert_close(&numbers(out.find("cm")[0]), &[30.0, 0.0, 0.0, 20.0, 10.0, 70.0]);
    assert_eq!(out.find("Do")[0].operands[0], Object::Name(b"Img1".to_vec()));
    Ok(())
}

#[test]
fn test_image_outside_the_base_directory_is_refused() {
    let dir = tempdir().unwrap();
    let err = render_with(
        r#"{ "root": { "type": "img", "style": "position-height: 10", "content": { "image": "../secret.png" } } }"#,
        &isolated_catalog(),
        small_page(),
        dir.path(),
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        FolioError::Render(RenderError::Resource(ResourceError::PathTraversal(_)))
    ));
}

#[test]
fn test_hsl_color_cannot_be_rendered() {
    let err = render_json(
        r#"{ "root": { "type": "box", "style": "position-height: 10; background-color: hsl(120, 0.5, 0.5)" } }"#,
    )
    .err()
    .unwrap();
    assert!(matches!(
        err,
        FolioError::Render(RenderError::UnsupportedColorSpace(ColorSpace::Hsl))
    ));
}

#[test]
fn test_unknown_font_without_substitution_fails() {
    let catalog = FontCatalog::new(FontConfig::isolated().with_substitution(false));
    let err = render_with(
        r#"{ "root": { "type": "p", "style": "font-family: Nonexistent", "content": { "text": "x" } } }"#,
        &catalog,
        small_page(),
        std::path::Path::new("."),
    )
    .err()
    .unwrap();
    assert!(matches!(err, FolioError::Font(FontError::NotFound { .. })));
}

#[test]
fn test_bad_style_value_names_the_attribute() {
    let err = render_json(
        r#"{ "root": { "type": "box", "style": "background-opacity: lots" } }"#,
    )
    .err()
    .unwrap();
    assert!(err.to_string().contains("background-opacity"), "{err}");
}

#[test]
fn test_clip_and_offset_are_scoped() -> TestResult {
    let out = render_json(
        r#"{ "root": { "type": "box",
            "style": "position-height: 10; clip-enabled: true; transform-offset: 5 5; background-color: black" } }"#,
    )?;
    assert_eq!(
        out.operators(),
        vec!["q", "cm", "re", "W", "n", "q", "g", "re", "f", "Q", "Q"]
    );
    assert_close(&numbers(out.find("cm")[0]), &[1.0, 0.0, 0.0, 1.0, 5.0, -5.0]);
    Ok(())
}
