use chat_widget_core::resize::{clamp_span, handle_chevron, is_wide};
use chat_widget_core::{
    plan_expand, Chevron, PanelEdge, Rect, ResizeLimits, ResizeSession, Viewport,
};

const LIMITS: ResizeLimits = ResizeLimits {
    min_width: 325.0,
    margin: 20.0,
};

fn viewport() -> Viewport {
    Viewport::new(1200.0, 800.0)
}

fn bottom_right_panel() -> Rect {
    Rect::new(855.0, 100.0, 325.0, 600.0)
}

fn bottom_left_panel() -> Rect {
    Rect::new(20.0, 100.0, 325.0, 600.0)
}

#[test]
fn dragging_left_edge_grows_panel_leftwards() {
    let panel = bottom_right_panel();
    let session = ResizeSession::begin(PanelEdge::Left, 855.0, panel, LIMITS);
    let span = session.candidate(755.0, viewport());
    assert_eq!(span.width, 425.0);
    assert_eq!(span.left, panel.left - 100.0);
    assert!(span.left >= 20.0);
    assert!(span.right() <= 1180.0);
}

#[test]
fn dragging_right_edge_grows_panel_rightwards() {
    let panel = bottom_left_panel();
    let session = ResizeSession::begin(PanelEdge::Right, 345.0, panel, LIMITS);
    let span = session.candidate(445.0, viewport());
    assert_eq!(span.left, 20.0);
    assert_eq!(span.width, 425.0);
}

#[test]
fn width_never_drops_below_minimum() {
    let panel = bottom_right_panel();
    let session = ResizeSession::begin(PanelEdge::Left, 855.0, panel, LIMITS);
    for pointer_x in [860.0, 1000.0, 1180.0, 5000.0] {
        let span = session.candidate(pointer_x, viewport());
        assert!(span.width >= LIMITS.min_width, "{pointer_x}: {span:?}");
    }
    let session = ResizeSession::begin(PanelEdge::Right, 345.0, bottom_left_panel(), LIMITS);
    for pointer_x in [300.0, 0.0, -4000.0] {
        let span = session.candidate(pointer_x, viewport());
        assert!(span.width >= LIMITS.min_width, "{pointer_x}: {span:?}");
    }
}

#[test]
fn left_edge_shrink_keeps_right_edge_anchored() {
    let panel = Rect::new(655.0, 100.0, 525.0, 600.0);
    let session = ResizeSession::begin(PanelEdge::Left, 655.0, panel, LIMITS);
    let span = session.candidate(2000.0, viewport());
    assert_eq!(span.width, 325.0);
    assert_eq!(span.right(), panel.right());
}

#[test]
fn extreme_drags_stay_inside_margins() {
    let view = viewport();
    let cases = [
        (PanelEdge::Left, bottom_right_panel()),
        (PanelEdge::Right, bottom_left_panel()),
    ];
    for (edge, panel) in cases {
        let start_x = match edge {
            PanelEdge::Left => panel.left,
            PanelEdge::Right => panel.right(),
        };
        let session = ResizeSession::begin(edge, start_x, panel, LIMITS);
        for pointer_x in [-10_000.0, -20.0, 0.0, 600.0, 1200.0, 10_000.0] {
            let span = session.candidate(pointer_x, view);
            assert!(span.left >= LIMITS.margin, "{edge:?} {pointer_x}: {span:?}");
            assert!(
                span.right() <= view.width - LIMITS.margin,
                "{edge:?} {pointer_x}: {span:?}"
            );
        }
    }
}

#[test]
fn narrow_viewport_prefers_minimum_width() {
    let view = Viewport::new(300.0, 800.0);
    let panel = Rect::new(0.0, 0.0, 325.0, 600.0);
    let span = clamp_span(PanelEdge::Right, panel, 100.0, LIMITS, view);
    assert_eq!(span.width, 325.0);
    assert_eq!(span.left, 20.0);
    let span = clamp_span(PanelEdge::Left, panel, 100.0, LIMITS, view);
    assert_eq!(span.width, 325.0);
    assert_eq!(span.left, 20.0);
}

#[test]
fn outline_keeps_vertical_extent() {
    let panel = bottom_right_panel();
    let session = ResizeSession::begin(PanelEdge::Left, 855.0, panel, LIMITS);
    let outline = session.outline(session.candidate(800.0, viewport()));
    assert_eq!(outline.top, panel.top);
    assert_eq!(outline.height, panel.height);
    assert_eq!(outline.width, 380.0);
}

#[test]
fn wide_means_above_eighty_percent() {
    let view = Viewport::new(1000.0, 800.0);
    assert!(!is_wide(800.0, view));
    assert!(is_wide(800.5, view));
    assert!(!is_wide(100.0, Viewport::new(0.0, 0.0)));
}

#[test]
fn chevrons_point_where_the_edge_will_move() {
    assert_eq!(handle_chevron(PanelEdge::Left, false), Chevron::PointsLeft);
    assert_eq!(handle_chevron(PanelEdge::Left, true), Chevron::PointsRight);
    assert_eq!(handle_chevron(PanelEdge::Right, false), Chevron::PointsRight);
    assert_eq!(handle_chevron(PanelEdge::Right, true), Chevron::PointsLeft);
}

#[test]
fn expand_from_left_edge_reaches_left_margin() {
    let panel = bottom_right_panel();
    let plan = plan_expand(panel, PanelEdge::Left, viewport(), LIMITS, None);
    assert!(plan.expanding);
    assert_eq!(plan.span.left, 20.0);
    assert_eq!(plan.span.right(), panel.right());
}

#[test]
fn expand_from_right_edge_reaches_right_margin() {
    let panel = bottom_left_panel();
    let plan = plan_expand(panel, PanelEdge::Right, viewport(), LIMITS, None);
    assert!(plan.expanding);
    assert_eq!(plan.span.left, 20.0);
    assert_eq!(plan.span.right(), 1180.0);
}

#[test]
fn collapse_restores_previous_width() {
    let panel = Rect::new(700.0, 100.0, 480.0, 600.0);
    let expanded = plan_expand(panel, PanelEdge::Left, viewport(), LIMITS, None);
    let wide_panel = Rect::new(expanded.span.left, 100.0, expanded.span.width, 600.0);
    let collapsed = plan_expand(
        wide_panel,
        PanelEdge::Left,
        viewport(),
        LIMITS,
        Some(panel.width),
    );
    assert!(!collapsed.expanding);
    assert_eq!(collapsed.span.width, 480.0);
    assert_eq!(collapsed.span.right(), panel.right());
}

#[test]
fn collapse_without_history_falls_back_to_minimum() {
    let wide_panel = Rect::new(20.0, 100.0, 1160.0, 600.0);
    let plan = plan_expand(wide_panel, PanelEdge::Right, viewport(), LIMITS, Some(1100.0));
    assert!(!plan.expanding);
    assert_eq!(plan.span.width, 325.0);
    assert_eq!(plan.span.left, 20.0);
}
