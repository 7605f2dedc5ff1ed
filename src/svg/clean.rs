/// Lines the Grease Pencil SVG exporter emits that are not part of the drawing.
///
/// Removal is purely textual, each substring including its trailing newline.
pub const RENDERER_BOILERPLATE: [&str; 3] = [
    "<?:anonymous?>\n",
    "<!-- Generator: Blender, SVG Export for Grease Pencil - v1.0 -->\n",
    "<?xml?>\n",
];

/// Remove every occurrence of [`RENDERER_BOILERPLATE`] from `svg`.
///
/// Absent substrings are not an error; nothing else in the document is touched.
pub fn strip_renderer_boilerplate(svg: &str) -> String {
    RENDERER_BOILERPLATE
        .iter()
        .fold(svg.to_owned(), |acc, boilerplate| acc.replace(boilerplate, ""))
}

#[cfg(test)]
#[path = "../../tests/unit/svg/clean.rs"]
mod tests;
