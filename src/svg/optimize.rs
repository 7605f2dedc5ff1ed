use std::{
    fmt,
    io::Write as _,
    path::PathBuf,
    process::{Command, Stdio},
    sync::{Arc, OnceLock},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{LottieSeqError, LottieSeqResult},
    svg::ids::rewrite_ids,
};

/// Cleanup flags handed to an [`SvgOptimizer`].
///
/// [`Default`] is the fixed configuration used for every exported frame: aggressive stripping,
/// single-line output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OptimizeOptions {
    /// Remove unreferenced `id` attributes.
    pub strip_ids: bool,
    /// Remove XML comments.
    pub strip_comments: bool,
    /// Rename surviving ids to the shortest available names.
    pub shorten_ids: bool,
    /// Indent nested elements. `false` means no indentation at all.
    pub indent: bool,
    /// Remove the `<?xml ...?>` declaration.
    pub strip_xml_prolog: bool,
    /// Remove `<title>`, `<desc>` and `<metadata>`.
    pub remove_descriptive_elements: bool,
    /// Emit the whole document on one line.
    pub no_line_breaks: bool,
    /// Remove `xml:space` declarations.
    pub strip_xml_space: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            strip_ids: true,
            strip_comments: true,
            shorten_ids: true,
            indent: false,
            strip_xml_prolog: true,
            remove_descriptive_elements: true,
            no_line_breaks: true,
            strip_xml_space: true,
        }
    }
}

impl OptimizeOptions {
    /// Command-line flags understood by `scour` for these options.
    pub fn scour_args(&self) -> Vec<&'static str> {
        let mut args = vec!["--quiet"];
        let flags = [
            (self.strip_ids, "--enable-id-stripping"),
            (self.strip_comments, "--enable-comment-stripping"),
            (self.shorten_ids, "--shorten-ids"),
            (!self.indent, "--indent=none"),
            (self.strip_xml_prolog, "--strip-xml-prolog"),
            (self.remove_descriptive_elements, "--remove-descriptive-elements"),
            (self.no_line_breaks, "--no-line-breaks"),
            (self.strip_xml_space, "--strip-xml-space"),
        ];
        args.extend(flags.iter().filter(|(on, _)| *on).map(|(_, flag)| *flag));
        args
    }
}

/// Pure SVG text to SVG text transformation applied to every frame before it is persisted.
pub trait SvgOptimizer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Optimize one frame's SVG text.
    fn optimize(&self, svg: &str, opts: &OptimizeOptions) -> LottieSeqResult<String>;
}

/// Pipes frames through the system `scour` binary.
#[derive(Clone, Debug)]
pub struct ScourOptimizer {
    program: PathBuf,
}

impl Default for ScourOptimizer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("scour"),
        }
    }
}

impl ScourOptimizer {
    /// Use a specific `scour` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SvgOptimizer for ScourOptimizer {
    fn name(&self) -> &'static str {
        "scour"
    }

    fn optimize(&self, svg: &str, opts: &OptimizeOptions) -> LottieSeqResult<String> {
        let mut child = Command::new(&self.program)
            .args(opts.scour_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "failed to spawn '{}' (is it installed and on PATH?)",
                    self.program.display()
                )
            })?;

        // scour reads all of stdin before writing anything, so writing up front cannot deadlock.
        let mut stdin = child
            .stdin
            .take()
            .context("failed to open scour stdin (unexpected)")?;
        stdin
            .write_all(svg.as_bytes())
            .context("failed to write svg to scour stdin")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .context("failed to wait for scour to finish")?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LottieSeqError::validation(format!(
                "scour exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| LottieSeqError::serde(format!("scour produced non-UTF-8 output: {e}")))
    }
}

/// In-process normalization through `usvg`.
///
/// The document is parsed into a render tree and written back. Comments, the XML prolog,
/// descriptive elements and `xml:space` never survive that round trip. Id stripping and
/// shortening run on the serialized output. Text is resolved against the system fonts and kept
/// as `<text>`; a frame whose text cannot be resolved is rejected instead of being emptied.
#[derive(Clone, Default)]
pub struct UsvgOptimizer {
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
}

impl fmt::Debug for UsvgOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsvgOptimizer")
            .field("fonts_loaded", &self.fontdb.get().is_some())
            .finish()
    }
}

impl UsvgOptimizer {
    /// Optimizer with a lazily loaded system font database.
    pub fn new() -> Self {
        Self::default()
    }

    fn fontdb(&self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.faces().count(), "loaded system fonts for usvg");
                Arc::new(db)
            })
            .clone()
    }
}

impl SvgOptimizer for UsvgOptimizer {
    fn name(&self) -> &'static str {
        "usvg"
    }

    fn optimize(&self, svg: &str, opts: &OptimizeOptions) -> LottieSeqResult<String> {
        let parse = usvg::Options {
            fontdb: self.fontdb(),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(svg, &parse).context("parse svg for optimization")?;

        if svg.contains("<text") && count_text_nodes(tree.root()) == 0 {
            return Err(LottieSeqError::validation(
                "svg text could not be resolved against the available fonts and would be dropped",
            ));
        }

        let indent = if opts.indent && !opts.no_line_breaks {
            usvg::Indent::Spaces(2)
        } else {
            usvg::Indent::None
        };
        let write = usvg::WriteOptions {
            indent,
            attributes_indent: usvg::Indent::None,
            preserve_text: true,
            ..usvg::WriteOptions::default()
        };
        Ok(rewrite_ids(
            &tree.to_string(&write),
            opts.strip_ids,
            opts.shorten_ids,
        ))
    }
}

fn count_text_nodes(group: &usvg::Group) -> usize {
    group
        .children()
        .iter()
        .map(|child| match child {
            usvg::Node::Group(g) => count_text_nodes(g),
            usvg::Node::Text(_) => 1,
            usvg::Node::Path(_) | usvg::Node::Image(_) => 0,
        })
        .sum()
}

/// Which optimizer a run should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Keep frames as rendered.
    None,
    /// Always use `scour`.
    Scour,
    /// Always use the built-in `usvg` normalizer.
    Usvg,
    /// `scour` when it is on `PATH`, otherwise `usvg`.
    #[default]
    Auto,
}

impl OptimizerKind {
    /// Instantiate the selected optimizer; `None` yields no optimizer.
    pub fn create(self) -> Option<Box<dyn SvgOptimizer>> {
        match self {
            Self::None => None,
            Self::Scour => Some(Box::new(ScourOptimizer::default())),
            Self::Usvg => Some(Box::new(UsvgOptimizer::new())),
            Self::Auto if is_scour_on_path() => Some(Box::new(ScourOptimizer::default())),
            Self::Auto => {
                tracing::info!("scour not found on PATH, falling back to usvg optimizer");
                Some(Box::new(UsvgOptimizer::new()))
            }
        }
    }
}

/// Whether a working `scour` binary is on `PATH`.
pub fn is_scour_on_path() -> bool {
    Command::new("scour")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Version string reported by the `scour` on `PATH`, if any.
pub fn scour_version() -> Option<String> {
    let output = Command::new("scour")
        .arg("--version")
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

#[cfg(test)]
#[path = "../../tests/unit/svg/optimize.rs"]
mod tests;
