use super::*;

#[test]
fn defaults_match_exporter_defaults() {
    let p = ConversionParams::default();
    assert_eq!(
        (p.frame_rate, p.frame_start, p.frame_end, p.optimize),
        (24, 1, 250, true)
    );
    let range = p.range().unwrap();
    assert_eq!(range.frame_count(), 250);
}

#[test]
fn validate_rejects_out_of_bounds_values() {
    let bad = [
        ConversionParams {
            frame_rate: 0,
            ..ConversionParams::default()
        },
        ConversionParams {
            frame_rate: 1001,
            ..ConversionParams::default()
        },
        ConversionParams {
            frame_start: 10,
            frame_end: 9,
            ..ConversionParams::default()
        },
        ConversionParams {
            frame_end: 10_001,
            ..ConversionParams::default()
        },
    ];
    for params in bad {
        assert!(params.validate().is_err(), "{params:?} should be rejected");
    }

    let edge = ConversionParams {
        frame_rate: 1000,
        frame_start: 0,
        frame_end: 0,
        optimize: false,
    };
    assert_eq!(edge.range().unwrap().frame_count(), 1);
}

#[test]
fn partial_config_file_fills_defaults() {
    let cfg: AppConfig =
        serde_json::from_str(r#"{"params":{"frame_rate":12},"optimizer":"usvg"}"#).unwrap();
    assert_eq!(cfg.params.frame_rate, 12);
    assert_eq!(cfg.params.frame_end, 250);
    assert_eq!(cfg.optimizer, OptimizerKind::Usvg);
    assert_eq!(cfg.logging, LoggingConfig::default());
}

#[test]
fn save_and_load_roundtrip() {
    let path = std::env::temp_dir().join(format!(
        "lottieseq_config_{}_{}/config.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let cfg = AppConfig {
        params: ConversionParams {
            frame_rate: 30,
            frame_start: 0,
            frame_end: 9,
            optimize: false,
        },
        optimizer: OptimizerKind::None,
        logging: LoggingConfig {
            level: "debug".to_string(),
            json: true,
        },
    };
    cfg.save(&path).unwrap();
    assert_eq!(AppConfig::from_file(&path).unwrap(), cfg);

    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        AppConfig::from_file(&path),
        Err(LottieSeqError::Serde(_))
    ));

    if let Some(parent) = path.parent() {
        std::fs::remove_dir_all(parent).ok();
    }
}
