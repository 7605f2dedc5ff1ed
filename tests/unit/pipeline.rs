use super::*;
use crate::{
    foundation::core::FrameIndex,
    lottie::{data_uri::decode_data_uri, model::LottieDocument},
    svg::optimize::OptimizeOptions,
};

fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!(
            "lottieseq_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
        .join("anim.json")
}

/// Serves fixed frames and can cancel the run after a given frame.
struct Frames {
    sizes: Vec<(u64, &'static str, &'static str)>,
    cancel_after: Option<(FrameIndex, CancelToken)>,
}

impl Frames {
    fn new(sizes: Vec<(u64, &'static str, &'static str)>) -> Self {
        Self {
            sizes,
            cancel_after: None,
        }
    }

    fn text(&self, frame: FrameIndex) -> String {
        let (_, w, h) = self
            .sizes
            .iter()
            .find(|(f, _, _)| *f == frame.0)
            .copied()
            .unwrap();
        let w = if w.is_empty() {
            String::new()
        } else {
            format!(" width=\"{w}\"")
        };
        format!("<?xml?>\n<svg{w} height=\"{h}\"><path d=\"M0 0 L{} 1\"/></svg>\n", frame.0)
    }
}

impl FrameRenderer for Frames {
    fn name(&self) -> &str {
        "frames"
    }

    fn render(&mut self, frame: FrameIndex, target: &Path) -> LottieSeqResult<()> {
        std::fs::write(target, self.text(frame)).unwrap();
        if let Some((at, token)) = &self.cancel_after {
            if *at == frame {
                token.cancel();
            }
        }
        Ok(())
    }
}

struct Trim;

impl SvgOptimizer for Trim {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn optimize(&self, svg: &str, _opts: &OptimizeOptions) -> LottieSeqResult<String> {
        Ok(svg.trim().to_string())
    }
}

fn params(start: u64, end: u64, optimize: bool) -> ConversionParams {
    ConversionParams {
        frame_rate: 24,
        frame_start: start,
        frame_end: end,
        optimize,
    }
}

#[test]
fn end_to_end_writes_document_and_cleans_up() {
    let out = temp_output("pipeline_ok");
    let mut frames = Frames::new(vec![(1, "100", "50"), (2, "80", "80"), (3, "100", "60")]);

    let report = convert(&params(1, 3, false), &out, &mut frames, None, &CancelToken::new()).unwrap();
    assert_eq!(report.frame_count, 3);
    assert_eq!(report.canvas, Dimensions::new(100.0, 80.0));
    assert!(!TransientDir::for_output(&out).exists());

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(report.bytes_written, bytes.len() as u64);
    let doc = LottieDocument::from_json(&bytes).unwrap();
    assert_eq!((doc.in_point, doc.out_point, doc.frame_rate), (0, 2, 24));

    let embedded: usize = doc
        .assets
        .iter()
        .map(|a| decode_data_uri(&a.path).unwrap().bytes.len())
        .sum();
    assert_eq!(report.exported_svg_bytes, embedded as u64);

    // Boilerplate is stripped before embedding; the rest is byte-exact.
    let payload = decode_data_uri(&doc.assets[0].path).unwrap().bytes;
    assert_eq!(
        String::from_utf8(payload).unwrap(),
        frames.text(FrameIndex(1)).replacen("<?xml?>\n", "", 1)
    );

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn optimizer_is_used_only_when_requested() {
    let out = temp_output("pipeline_opt");
    let mut frames = Frames::new(vec![(0, "1", "1")]);

    convert(&params(0, 0, true), &out, &mut frames, Some(&Trim), &CancelToken::new()).unwrap();
    let doc = LottieDocument::from_json(&std::fs::read(&out).unwrap()).unwrap();
    let payload = decode_data_uri(&doc.assets[0].path).unwrap().bytes;
    assert!(!payload.ends_with(b"\n"));

    std::fs::remove_file(&out).unwrap();
    convert(&params(0, 0, false), &out, &mut frames, Some(&Trim), &CancelToken::new()).unwrap();
    let doc = LottieDocument::from_json(&std::fs::read(&out).unwrap()).unwrap();
    let payload = decode_data_uri(&doc.assets[0].path).unwrap().bytes;
    assert!(payload.ends_with(b"\n"));

    assert!(matches!(
        convert(&params(0, 0, true), &out, &mut frames, None, &CancelToken::new()),
        Err(LottieSeqError::Validation(_))
    ));

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn missing_width_writes_nothing_and_keeps_previous_output() {
    let out = temp_output("pipeline_missing");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, "previous").unwrap();

    let mut frames = Frames::new(vec![(1, "10", "10"), (2, "", "10")]);
    let err = convert(&params(1, 2, false), &out, &mut frames, None, &CancelToken::new()).unwrap_err();
    assert!(matches!(
        err,
        LottieSeqError::MissingDimensions {
            frame: FrameIndex(2),
            attribute: "width"
        }
    ));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");

    let dir = TransientDir::for_output(&out);
    assert!(dir.frame_path(FrameIndex(2)).is_file());

    // The kept directory blocks the next run until it is cleaned up.
    assert!(matches!(
        convert(&params(1, 2, false), &out, &mut frames, None, &CancelToken::new()),
        Err(LottieSeqError::DirectoryExists { .. })
    ));
    assert!(dir.exists());

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn failed_write_keeps_previous_output_intact() {
    let out = temp_output("pipeline_write_fail");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, "previous").unwrap();

    // A directory squatting on the staging path makes the write fail after assembly.
    let mut partial = out.as_os_str().to_owned();
    partial.push(PARTIAL_SUFFIX);
    std::fs::create_dir(&partial).unwrap();

    let mut frames = Frames::new(vec![(1, "10", "10")]);
    assert!(matches!(
        convert(&params(1, 1, false), &out, &mut frames, None, &CancelToken::new()),
        Err(LottieSeqError::Other(_))
    ));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");
    assert!(TransientDir::for_output(&out).exists());

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn successful_write_replaces_output_without_leftovers() {
    let out = temp_output("pipeline_replace");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, "previous").unwrap();

    let mut frames = Frames::new(vec![(1, "10", "10")]);
    convert(&params(1, 1, false), &out, &mut frames, None, &CancelToken::new()).unwrap();
    assert!(LottieDocument::from_json(&std::fs::read(&out).unwrap()).is_ok());

    let names: Vec<_> = std::fs::read_dir(out.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("anim.json")]);

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn cancellation_removes_transient_directory() {
    let out = temp_output("pipeline_cancel");
    let cancel = CancelToken::new();
    let mut frames = Frames::new(vec![(1, "1", "1"), (2, "1", "1"), (3, "1", "1")]);
    frames.cancel_after = Some((FrameIndex(2), cancel.clone()));

    assert!(matches!(
        convert(&params(1, 3, false), &out, &mut frames, None, &cancel),
        Err(LottieSeqError::Cancelled {
            frame: FrameIndex(3)
        })
    ));
    assert!(!TransientDir::for_output(&out).exists());
    assert!(!out.exists());

    std::fs::remove_dir_all(out.parent().unwrap()).ok();
}

#[test]
fn invalid_params_fail_before_any_io() {
    let out = temp_output("pipeline_params");
    let mut frames = Frames::new(vec![]);
    assert!(matches!(
        convert(&params(5, 4, false), &out, &mut frames, None, &CancelToken::new()),
        Err(LottieSeqError::Validation(_))
    ));
    assert!(!out.parent().unwrap().exists());
}
