use ansishot_render::{
    render_with, Compositor, Document, Geometry, LayoutEngine, Rect, RenderConfig, RenderError,
};
use ansishot_test_utils::fixtures::data;
use ansishot_test_utils::{init_test_logging, FixedMetrics, Op, RecordingCanvas};
use pretty_assertions::assert_eq;

fn geometry(config: &RenderConfig, input: &str) -> Geometry {
    let document = Document::preprocess(input, None, &config.attribution);
    LayoutEngine::new(config, &FixedMetrics::default())
        .layout(&document)
        .geometry
}

#[test]
fn frame_placement() {
    let config = RenderConfig::default();
    let geometry = geometry(&config, data::RED_HELLO);
    let frame = Compositor::new(&config).frame(&geometry);

    assert_eq!((frame.width, frame.height), geometry.canvas_size());
    assert_eq!(
        frame.window,
        Rect::new(
            80.0,
            80.0,
            frame.width as f32 - 192.0,
            frame.height as f32 - 192.0
        )
    );
    assert_eq!(frame.shadow, frame.window.translate(32.0, 32.0));

    // padding 48, inset 8, distance 50
    assert_eq!(frame.controls, [(136.0, 136.0), (186.0, 136.0), (236.0, 136.0)]);
    assert_eq!(frame.text_origin, geometry.text_origin());
}

#[test]
fn frame_scales_uniformly() {
    let one = RenderConfig::default().with_scale(1.0);
    let two = RenderConfig::default().with_scale(2.0);
    let a = Compositor::new(&one).frame(&geometry(&one, ""));
    let b = Compositor::new(&two).frame(&geometry(&two, ""));

    assert_eq!(b.window.x, 2.0 * a.window.x);
    assert_eq!(b.controls[1].0 - b.controls[0].0, 2.0 * (a.controls[1].0 - a.controls[0].0));
}

#[test]
fn draw_order() {
    init_test_logging();
    let config = RenderConfig::default();
    let frame = Compositor::new(&config).frame(&geometry(&config, data::PLAIN));
    let mut canvas = RecordingCanvas::new(frame.width, frame.height, FixedMetrics::default());
    Compositor::new(&config).draw(&mut canvas, &frame).unwrap();

    let ops = &canvas.ops;
    assert_eq!(ops.len(), 6);
    assert_eq!(
        ops[0],
        Op::Layer {
            width: frame.width,
            height: frame.height,
            x: 0,
            y: 0
        }
    );
    assert_eq!(
        ops[1],
        Op::FillRoundedRectangle {
            rect: frame.window,
            radius: config.corner_radius(),
            color: config.window_color,
        }
    );
    assert_eq!(
        ops[2],
        Op::StrokeRoundedRectangle {
            rect: frame.window,
            radius: config.corner_radius(),
            width: config.stroke_width(),
            color: config.border_color,
        }
    );
    for (i, op) in ops[3..].iter().enumerate() {
        assert_eq!(
            op,
            &Op::FillCircle {
                cx: frame.controls[i].0,
                cy: frame.controls[i].1,
                radius: config.control_radius(),
                color: config.control_colors[i],
            }
        );
    }
}

#[test]
fn full_pass_paints_after_frame() {
    let config = RenderConfig::default();
    let metrics = FixedMetrics::default();
    let mut size = None;
    let canvas = render_with(&config, &metrics, data::RED_HELLO, Some("jan"), |w, h| {
        size = Some((w, h));
        Ok(RecordingCanvas::new(w, h, metrics))
    })
    .unwrap();

    assert_eq!(size, Some((canvas.width, canvas.height)));
    assert!(matches!(canvas.ops[5], Op::FillCircle { .. }));
    assert!(matches!(canvas.ops[6], Op::Text { .. }));

    let text = canvas.drawn_text();
    assert!(text.starts_with("Hello_"));
    assert!(text.ends_with("https://ohmyposh.dev by jan"));
}

#[test]
fn canvas_errors_propagate() {
    let config = RenderConfig::default();
    let result = render_with(
        &config,
        &FixedMetrics::default(),
        "x",
        None,
        |width, height| -> Result<RecordingCanvas, _> {
            Err(RenderError::EmptyCanvas { width, height })
        },
    );
    assert!(matches!(result, Err(RenderError::EmptyCanvas { .. })));
}
