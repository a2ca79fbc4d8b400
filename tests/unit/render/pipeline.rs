use std::sync::Arc;

use super::*;
use crate::compositions::{CompositionId, mount};
use crate::foundation::core::{Canvas, Fps, Timeline};

fn fixture() -> (Box<dyn Composition>, Rasterizer) {
    let tl = Timeline::new(
        8,
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 32,
            height: 32,
        },
    )
    .unwrap();
    let comp = mount(
        CompositionId::NodeNetwork,
        tl,
        &serde_json::json!({ "node_count": 5, "distance_threshold": 60.0 }),
    )
    .unwrap();
    let rasterizer = Rasterizer::with_fontdb(Arc::new(usvg::fontdb::Database::new()));
    (comp, rasterizer)
}

fn all_frames() -> FrameRange {
    FrameRange::new(FrameIndex(0), FrameIndex(8)).unwrap()
}

#[test]
fn sequential_and_parallel_renders_match_in_order() {
    let (comp, rasterizer) = fixture();
    let images = ImageStore::default();
    let seq = render_frames(
        comp.as_ref(),
        all_frames(),
        &rasterizer,
        &images,
        &RenderThreading::default(),
    )
    .unwrap();
    let par = render_frames(
        comp.as_ref(),
        all_frames(),
        &rasterizer,
        &images,
        &RenderThreading {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 8);
    assert_eq!(par.len(), 8);
    for (f, (a, b)) in seq.iter().zip(&par).enumerate() {
        assert_eq!(a.data, b.data, "frame {f}");
        let single = render_frame_rgba(comp.as_ref(), FrameIndex(f as u64), &rasterizer, &images).unwrap();
        assert_eq!(single.data, a.data, "frame {f}");
    }
}

#[test]
fn sub_ranges_start_where_requested() {
    let (comp, rasterizer) = fixture();
    let images = ImageStore::default();
    let range = FrameRange::new(FrameIndex(5), FrameIndex(7)).unwrap();
    let frames = render_frames(comp.as_ref(), range, &rasterizer, &images, &RenderThreading::default()).unwrap();
    let expected = render_frame_rgba(comp.as_ref(), FrameIndex(5), &rasterizer, &images).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].data, expected.data);
}

#[test]
fn invalid_ranges_are_evaluation_errors() {
    let (comp, rasterizer) = fixture();
    let images = ImageStore::default();
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    let past_end = FrameRange::new(FrameIndex(0), FrameIndex(9)).unwrap();
    for range in [empty, past_end] {
        let err = render_frames(comp.as_ref(), range, &rasterizer, &images, &RenderThreading::default())
            .unwrap_err();
        assert!(matches!(err, FramewrightError::Evaluation(_)), "{err}");
    }
}

#[test]
fn mp4_range_is_checked_before_encoding() {
    let (comp, rasterizer) = fixture();
    let opts = RenderToMp4Opts {
        range: Some(FrameRange::new(FrameIndex(0), FrameIndex(100)).unwrap()),
        ..Default::default()
    };
    let err = render_to_mp4(
        comp.as_ref(),
        std::env::temp_dir().join("framewright_never_written.mp4"),
        opts,
        &rasterizer,
        &ImageStore::default(),
    )
    .unwrap_err();
    assert!(matches!(err, FramewrightError::Evaluation(_)), "{err}");
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).unwrap_err().is_config());
    assert!(build_thread_pool(Some(1)).is_ok());
}

#[test]
fn chunk_size_is_at_least_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(64), 64);
}
