use super::*;
use crate::encode::sink::InMemorySink;
use crate::world::snapshot::WorldSnapshot;

fn pipeline() -> GraphicPipeline {
    GraphicPipeline::new(3, 3, PipelineOpts::default()).unwrap()
}

#[test]
fn render_before_initialize_is_rejected() {
    let mut p = pipeline();
    let err = p
        .render(&WorldSnapshot::new(3, 3), RenderMode::RgbArray)
        .unwrap_err();
    assert!(matches!(err, RenderError::Validation(_)));
    assert!(err.to_string().contains("not initialized"));
}

#[test]
fn initialize_allocates_canvas_with_info_rows() {
    let mut p = pipeline();
    assert!(p.frame().is_none());
    p.initialize().unwrap();
    p.initialize().unwrap();

    let frame = p.frame().unwrap();
    assert_eq!((frame.width, frame.height), (135, 225));
    assert_eq!(frame.data.len(), 135 * 225 * 4);
}

#[test]
fn modes_control_the_return_value() {
    let mut p = pipeline();
    p.initialize().unwrap();
    let world = WorldSnapshot::new(3, 3);

    assert!(p.render(&world, RenderMode::Human).unwrap().is_none());
    let arr = p.render(&world, RenderMode::RgbArray).unwrap().unwrap();
    assert_eq!(arr.shape(), [225, 135, 3]);
    assert_eq!(arr.get(0, 0), Some([245, 230, 210]));
}

#[test]
fn world_with_other_grid_is_rejected() {
    let mut p = pipeline();
    p.initialize().unwrap();
    let err = p
        .render(&WorldSnapshot::new(4, 3), RenderMode::Human)
        .unwrap_err();
    assert!(err.to_string().contains("does not match"));
}

#[test]
fn display_flag_without_sink_fails_initialize() {
    let opts = PipelineOpts {
        display: true,
        ..PipelineOpts::default()
    };
    let mut p = GraphicPipeline::new(3, 3, opts).unwrap();
    assert!(p.initialize().is_err());
    assert!(!p.is_initialized());
}

#[test]
fn shutdown_releases_buffer_and_is_idempotent() {
    let mut p = pipeline();
    p.initialize().unwrap();
    p.shutdown().unwrap();
    assert!(!p.is_initialized());
    p.shutdown().unwrap();
    assert!(
        p.render(&WorldSnapshot::new(3, 3), RenderMode::Human)
            .is_err()
    );
}

#[test]
fn display_sink_receives_each_frame() {
    // `Box<dyn FrameSink>` hides the sink, so observe it through a shared handle.
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Shared(Rc<RefCell<InMemorySink>>);

    impl FrameSink for Shared {
        fn begin(&mut self, cfg: SinkConfig) -> RenderResult<()> {
            self.0.borrow_mut().begin(cfg)
        }
        fn push_frame(&mut self, tick: u64, frame: &FrameRGBA) -> RenderResult<()> {
            self.0.borrow_mut().push_frame(tick, frame)
        }
        fn end(&mut self) -> RenderResult<()> {
            self.0.borrow_mut().end()
        }
    }

    let sink = Rc::new(RefCell::new(InMemorySink::new()));
    let mut p = pipeline().with_display(Box::new(Shared(Rc::clone(&sink))));
    p.initialize().unwrap();

    let mut world = WorldSnapshot::new(3, 3);
    for t in 0..3 {
        world.t = t;
        p.render(&world, RenderMode::Human).unwrap();
    }
    p.shutdown().unwrap();

    let sink = sink.borrow();
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 135,
            height: 225
        })
    );
    let ticks: Vec<u64> = sink.frames.iter().map(|(t, _)| *t).collect();
    assert_eq!(ticks, [0, 1, 2]);
    assert!(sink.ended());
}

#[test]
fn exports_go_through_one_png_sequence() {
    let root = std::env::temp_dir().join(format!(
        "kitchen_render_pipeline_export_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let record_dir = root.join("record");
    let opts = PipelineOpts {
        record_dir: record_dir.clone(),
        ..PipelineOpts::default()
    };
    let mut p = GraphicPipeline::new(3, 3, opts).unwrap();
    p.initialize().unwrap();
    assert!(p.exported().is_empty());

    let mut world = WorldSnapshot::new(3, 3);
    for t in [4, 5] {
        world.t = t;
        p.export_frame(&world, t).unwrap();
    }
    assert_eq!(
        p.exported(),
        &[record_dir.join("t=004.png"), record_dir.join("t=005.png")]
    );
    assert!(record_dir.join("t=005.png").is_file());

    p.shutdown().unwrap();
    assert!(p.exported().is_empty());

    let _ = std::fs::remove_dir_all(&root);
}
