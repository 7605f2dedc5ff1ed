use super::*;

const DOC: &str = concat!(
    r#"<svg width="10" height="10" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">"#,
    r#"<defs><linearGradient id="stroke_gradient" x1="0" x2="1"/>"#,
    r#"<clipPath id="frame_clip"><path d="M0 0"/></clipPath></defs>"#,
    r#"<path id="stroke_0" fill="url(#stroke_gradient)" clip-path="url(#frame_clip)" d="M0 0L1 1"/>"#,
    r##"<image id="ref_image" xlink:href="#stroke_gradient"/>"##,
    r#"</svg>"#
);

#[test]
fn unreferenced_ids_are_dropped() {
    let out = rewrite_ids(DOC, true, false);
    assert!(!out.contains("stroke_0"));
    assert!(!out.contains("ref_image"));
    assert!(out.contains(r#"<path fill="url(#stroke_gradient)""#));
    assert!(out.contains(r#"id="stroke_gradient""#));
    assert!(out.contains(r#"id="frame_clip""#));
}

#[test]
fn surviving_ids_are_shortened_with_their_references() {
    let out = rewrite_ids(DOC, true, true);
    assert!(out.contains(r#"<linearGradient id="a""#));
    assert!(out.contains(r#"<clipPath id="b">"#));
    assert!(out.contains(r#"fill="url(#a)" clip-path="url(#b)""#));
    assert!(out.contains(r##"xlink:href="#a""##));
    assert!(!out.contains("stroke_"));
    assert!(!out.contains("frame_clip"));
}

#[test]
fn shortening_without_stripping_keeps_every_element_id() {
    let out = rewrite_ids(DOC, false, true);
    assert!(out.contains(r#"<path id="c""#));
    assert!(out.contains(r#"<image id="d""#));
}

#[test]
fn disabled_flags_leave_text_untouched() {
    assert_eq!(rewrite_ids(DOC, false, false), DOC);
}

#[test]
fn dangling_references_are_kept() {
    let doc = r#"<svg><path fill="url(#missing)"/></svg>"#;
    assert_eq!(rewrite_ids(doc, true, true), doc);
}

#[test]
fn short_names_run_through_both_cases_then_grow() {
    assert_eq!(short_name(0), "a");
    assert_eq!(short_name(25), "z");
    assert_eq!(short_name(26), "A");
    assert_eq!(short_name(51), "Z");
    assert_eq!(short_name(52), "aa");
    assert_eq!(short_name(53), "ab");
}
