use super::*;

#[test]
fn strips_all_three_boilerplate_lines() {
    let raw = "<?xml?>\n<?:anonymous?>\n<!-- Generator: Blender, SVG Export for Grease Pencil - v1.0 -->\n<svg width=\"10\" height=\"10\"/>\n";
    assert_eq!(
        strip_renderer_boilerplate(raw),
        "<svg width=\"10\" height=\"10\"/>\n"
    );
}

#[test]
fn leaves_clean_documents_untouched() {
    let svg = "<?xml version=\"1.0\"?>\n<svg width=\"1\" height=\"1\"><!-- note --></svg>";
    assert_eq!(strip_renderer_boilerplate(svg), svg);
}

#[test]
fn only_removes_exact_lines() {
    // Without the trailing newline the marker is not boilerplate.
    let svg = "<svg/><?xml?>";
    assert_eq!(strip_renderer_boilerplate(svg), svg);
}
