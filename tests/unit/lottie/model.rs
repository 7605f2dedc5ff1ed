use super::*;

fn one_frame_doc() -> LottieDocument {
    let range = ExportRange::new(FrameIndex(3), FrameIndex(3), 24).unwrap();
    LottieDocument {
        version: LOTTIE_VERSION.to_string(),
        frame_rate: 24,
        in_point: 0,
        out_point: 0,
        width: 100.0,
        height: 80.5,
        assets: vec![ImageAsset::embedded_svg(
            "svg_3".to_string(),
            "<svg/>",
            Dimensions::new(100.0, 80.5),
        )],
        layers: vec![ImageLayer::single_frame(
            range,
            FrameIndex(3),
            "svg_3".to_string(),
        )],
    }
}

#[test]
fn keys_and_order_match_lottie_shape() {
    let json = String::from_utf8(one_frame_doc().to_json_vec().unwrap()).unwrap();
    assert!(json.starts_with(r#"{"v":"5.5.2","fr":24,"ip":0,"op":0,"w":100.0,"h":80.5,"assets":["#));
    assert!(json.contains(
        r#"{"id":"svg_3","nm":"svg_3","u":"","p":"data:image/svg+xml;base64,PHN2Zy8+","e":1,"w":100.0,"h":80.5,"t":"seq"}"#
    ));
    assert!(json.contains(
        r#"{"nm":"frame_3","hd":false,"ty":2,"ip":3,"op":4,"st":0.125,"ks":{},"ao":0,"refId":"svg_3"}"#
    ));
}

#[test]
fn layer_keeps_host_frame_numbers() {
    let range = ExportRange::new(FrameIndex(10), FrameIndex(20), 30).unwrap();
    let layer = ImageLayer::single_frame(range, FrameIndex(15), "svg_15".to_string());
    assert_eq!((layer.in_point, layer.out_point), (15, 16));
    assert_eq!(layer.start_time, 0.5);
    assert_eq!(layer.layer_type, IMAGE_LAYER_TYPE);
    assert!(layer.transform.is_empty());
}

#[test]
fn json_roundtrip() {
    let doc = one_frame_doc();
    let de = LottieDocument::from_json(&doc.to_json_vec().unwrap()).unwrap();
    assert_eq!(de, doc);
    assert_eq!(de.frame_count(), 1);
}

#[test]
fn from_json_rejects_garbage() {
    assert!(matches!(
        LottieDocument::from_json(b"{\"v\":1}"),
        Err(LottieSeqError::Serde(_))
    ));
}
