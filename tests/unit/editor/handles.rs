use super::*;
use crate::editor::shape::ShapeBox;
use crate::foundation::core::Point3;

fn sample_box() -> ShapeBox {
    ShapeBox::from_extents(Point3::ZERO, Point3::new(40, 30, 20)).unwrap()
}

fn pos(layout: &HandleLayout, kind: HandleKind) -> (i32, i32) {
    let h = layout.handle(kind).unwrap();
    (h.x, h.y)
}

#[test]
fn bbox_layout_at_unit_scale() {
    let mut l = HandleLayout::new(EditMode::BoundingBox, 8);
    l.compute(&sample_box(), 100, 100, 1);

    assert_eq!(l.handles().len(), 4);
    assert_eq!(pos(&l, HandleKind::Position), (96, 76));
    assert_eq!(pos(&l, HandleKind::Length), (136, 91));
    assert_eq!(pos(&l, HandleKind::Width), (116, 106));
    assert_eq!(pos(&l, HandleKind::Height), (116, 76));
}

#[test]
fn bbox_layout_scales_extents_not_offset() {
    let mut l = HandleLayout::new(EditMode::BoundingBox, 8);
    l.compute(&sample_box(), 100, 200, 2);
    assert_eq!(l.scale(), 2);
    assert_eq!(pos(&l, HandleKind::Position), (96, 156));
    assert_eq!(pos(&l, HandleKind::Length), (176, 186));
    assert_eq!(pos(&l, HandleKind::Width), (136, 216));
    assert_eq!(pos(&l, HandleKind::Height), (136, 156));
}

#[test]
fn zero_scale_is_clamped() {
    let mut l = HandleLayout::new(EditMode::BoundingBox, 8);
    l.compute(&sample_box(), 0, 0, 0);
    assert_eq!(l.scale(), 1);
}

#[test]
fn point_layout_projects_each_corner() {
    let mut l = HandleLayout::new(EditMode::Points, 8);
    l.compute(&sample_box(), 100, 100, 1);

    assert_eq!(l.handles().len(), 8);
    assert_eq!(
        pos(&l, HandleKind::Corner(Corner::BottomFrontLeft)),
        (96, 96)
    );
    assert_eq!(
        pos(&l, HandleKind::Corner(Corner::TopBackRight)),
        (136, 106)
    );
    assert_eq!(
        pos(&l, HandleKind::Corner(Corner::TopFrontLeft)),
        (96, 76)
    );
    assert!(l.handle(HandleKind::Position).is_none());
}

#[test]
fn point_layout_uses_scale() {
    let mut l = HandleLayout::new(EditMode::Points, 8);
    l.compute(&sample_box(), 0, 0, 3);
    assert_eq!(
        pos(&l, HandleKind::Corner(Corner::BottomBackRight)),
        (-4 + 120, -4 + 90)
    );
}

#[test]
fn hit_test_is_half_open_per_marker() {
    let mut l = HandleLayout::new(EditMode::BoundingBox, 8);
    l.compute(&sample_box(), 100, 100, 1);

    assert_eq!(l.hit_test(Point::new(96.0, 76.0)), Some(HandleKind::Position));
    assert_eq!(l.hit_test(Point::new(103.9, 83.9)), Some(HandleKind::Position));
    assert_eq!(l.hit_test(Point::new(104.0, 76.0)), None);
    assert_eq!(l.hit_test(Point::new(140.0, 95.0)), Some(HandleKind::Length));
    assert_eq!(l.hit_test(Point::new(0.0, 0.0)), None);
}

#[test]
fn overlapping_handles_prefer_layout_order() {
    let flat = ShapeBox::from_extents(Point3::ZERO, Point3::ZERO).unwrap();
    let mut l = HandleLayout::new(EditMode::BoundingBox, 8);
    l.compute(&flat, 10, 10, 1);
    assert_eq!(l.hit_test(Point::new(10.0, 10.0)), Some(HandleKind::Position));
}

#[test]
fn mode_switch_clears_until_recompute() {
    let mut l = HandleLayout::from_config(EditMode::BoundingBox, &RenderConfig::default());
    l.compute(&sample_box(), 0, 0, 1);
    l.set_mode(EditMode::Points);
    assert!(l.handles().is_empty());
    l.compute(&sample_box(), 0, 0, 1);
    assert_eq!(l.handles().len(), 8);
}

#[test]
fn marker_area_matches_hit_rect() {
    let h = Handle {
        kind: HandleKind::Height,
        x: 3,
        y: 4,
    };
    assert_eq!(h.marker(8), DrawingArea::new(3, 4, 8, 8));
    assert_eq!(h.hit_rect(8), h.marker(8).to_rect());
}
