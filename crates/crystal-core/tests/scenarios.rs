//! End-to-end widget scenarios driven through the host seam.

use approx::assert_relative_eq;
use glam::Vec3;

use crystal_core::config::{FieldConfig, OrbitConfig};
use crystal_core::kernel::influence;
use crystal_core::{
    ContainerRect, HeadlessDriver, HostEvent, LifecycleState, LocalHost, RandomSource,
    SceneConfig, Viewport, Widget, WidgetError, WidgetKind,
};

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.field.crystal_count = 200;
    config.globe.sphere_segments = 12;
    config
}

fn attached(kind: WidgetKind, config: SceneConfig, host: &mut LocalHost) -> Widget<HeadlessDriver> {
    let mut widget =
        Widget::new(kind, config, HeadlessDriver::new()).with_random(RandomSource::Seeded(42));
    widget.attach(host).expect("attach");
    widget
}

fn frames(widget: &mut Widget<HeadlessDriver>, host: &mut LocalHost, count: usize) {
    for _ in 0..count {
        let request = host.take_frame().expect("frame loop stalled");
        assert!(widget.on_frame(host, request));
    }
}

fn positions(widget: &Widget<HeadlessDriver>) -> Vec<Vec3> {
    widget
        .kernel()
        .expect("attached")
        .scene()
        .objects()
        .iter()
        .map(|o| o.position())
        .collect()
}

#[test]
fn test_influence_values() {
    assert_relative_eq!(influence(0.0, 10.0), 1.0);
    assert_relative_eq!(influence(5.0, 10.0), 0.5);
    assert_relative_eq!(influence(10.0, 10.0), 0.0);
    assert_relative_eq!(influence(12.0, 10.0), 0.0);
}

#[test]
fn test_crystals_converge_on_centered_pointer() {
    let mut config = small_config();
    config.field = FieldConfig {
        crystal_count: 100,
        spread: 10.0,
        ..FieldConfig::default()
    };
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::CrystalField, config, &mut host);

    // Surface centre maps to the scene origin.
    widget.handle_event(&HostEvent::PointerMove { x: 200.0, y: 200.0 });

    let start: Vec<f32> = positions(&widget).iter().map(|p| p.length()).collect();
    let mut previous = start.clone();
    for _ in 0..100 {
        frames(&mut widget, &mut host, 1);
        let current: Vec<f32> = positions(&widget).iter().map(|p| p.length()).collect();
        for (now, before) in current.iter().zip(&previous) {
            assert!(now <= before, "crystal moved away from the pointer");
        }
        previous = current;
    }

    frames(&mut widget, &mut host, 1900);
    for (end, initial) in positions(&widget).iter().zip(&start) {
        assert!(end.length() < *initial);
        if *initial < 5.0 {
            assert!(end.length() < 0.1);
        }
    }
}

#[test]
fn test_distant_crystals_stay_home() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::CrystalField, small_config(), &mut host);

    let before = positions(&widget);
    frames(&mut widget, &mut host, 50);
    let after = positions(&widget);

    // Without a pointer sample the projection sits at the origin.
    let radius = FieldConfig::default().influence_radius;
    let mut checked = 0;
    for (a, b) in before.iter().zip(&after) {
        if a.length() > radius + 1.0 {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
            assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_scroll_eases_depth_within_bounds() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::CrystalField, small_config(), &mut host);

    widget.handle_event(&HostEvent::Wheel { delta_y: 100.0 });
    let depth = widget.kernel().and_then(|k| k.camera().depth).expect("depth control");
    assert_relative_eq!(depth.target(), 31.0);

    let mut previous = depth.actual();
    for _ in 0..60 {
        frames(&mut widget, &mut host, 1);
        let camera = widget.kernel().expect("attached").camera();
        let depth = camera.depth.expect("depth control");
        assert!(depth.actual() >= previous);
        assert!(depth.actual() <= depth.target());
        assert_relative_eq!(camera.position.z, depth.actual());
        previous = depth.actual();
    }

    widget.handle_event(&HostEvent::Wheel { delta_y: 1.0e6 });
    let depth = widget.kernel().and_then(|k| k.camera().depth).expect("depth control");
    assert_relative_eq!(depth.target(), 45.0);

    widget.handle_event(&HostEvent::Wheel { delta_y: -1.0e6 });
    let depth = widget.kernel().and_then(|k| k.camera().depth).expect("depth control");
    assert_relative_eq!(depth.target(), 15.0);
}

#[test]
fn test_resize_mid_animation() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::CrystalField, small_config(), &mut host);
    widget.handle_event(&HostEvent::PointerMove { x: 120.0, y: 80.0 });
    frames(&mut widget, &mut host, 10);

    let before = positions(&widget);
    let resized = ContainerRect::sized(800.0, 800.0);
    host.set_container(resized);
    widget.handle_event(&HostEvent::Resize(resized));

    assert_eq!(widget.viewport(), Some(Viewport::square(800)));
    assert_eq!(widget.driver().viewport(), Some(Viewport::square(800)));
    assert_relative_eq!(widget.kernel().expect("attached").camera().aspect(), 1.0);
    assert_eq!(positions(&widget), before);

    frames(&mut widget, &mut host, 1);
    assert_eq!(
        widget.driver().last_frame().map(|(_, viewport)| viewport),
        Some(Viewport::square(800))
    );
}

#[test]
fn test_zero_container_builds_and_skips_empty_frames() {
    let mut host = LocalHost::new(ContainerRect::sized(0.0, 0.0));
    let config = small_config();
    let min_edge = config.field.surface.min_edge;
    let mut widget = attached(WidgetKind::CrystalField, config, &mut host);

    assert_eq!(widget.viewport(), Some(Viewport::square(min_edge)));
    assert!(widget.kernel().expect("attached").camera().aspect().is_finite());

    widget.handle_event(&HostEvent::Resize(ContainerRect::sized(0.0, 0.0)));
    widget.handle_event(&HostEvent::PointerMove { x: 10.0, y: 10.0 });
    frames(&mut widget, &mut host, 3);

    assert_eq!(widget.kernel().expect("attached").input().pointer, None);
    assert_eq!(widget.driver().frames(), 0);
    assert_eq!(widget.driver().skipped_frames(), 3);
}

#[test]
fn test_reattach_builds_same_shape() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 300.0));
    for kind in WidgetKind::ALL {
        let mut widget = Widget::new(kind, small_config(), HeadlessDriver::new());

        widget.attach(&mut host).expect("first attach");
        let first = widget.kernel().expect("attached").scene().shape();
        widget.detach(&mut host);

        widget.attach(&mut host).expect("second attach");
        let second = widget.kernel().expect("attached").scene().shape();
        widget.detach(&mut host);

        assert_eq!(first, second, "{} shape changed", kind.name());
        assert_eq!(host.listener_count(), 0);
    }
}

#[test]
fn test_double_detach_is_harmless() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::Globe, small_config(), &mut host);

    widget.detach(&mut host);
    widget.detach(&mut host);

    assert_eq!(widget.state(), LifecycleState::Unattached);
    assert_eq!(widget.driver().releases(), 1);
    assert_eq!(host.pending_frame(), None);
}

#[test]
fn test_no_tick_after_detach() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::FloatingCrystal, small_config(), &mut host);
    frames(&mut widget, &mut host, 4);
    let stale = host.pending_frame().expect("next frame requested");

    widget.detach(&mut host);
    assert!(!widget.on_frame(&mut host, stale));
    assert!(widget.kernel().is_none());
    assert_eq!(widget.driver().frames(), 4);
    assert_eq!(host.pending_frame(), None);
}

#[test]
fn test_unavailable_surface_registers_nothing() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = Widget::new(WidgetKind::Globe, small_config(), HeadlessDriver::unavailable());

    let err = widget.attach(&mut host).expect_err("surface should be unavailable");
    assert!(matches!(err, WidgetError::SurfaceUnavailable(_)));
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_frame(), None);
    assert!(!widget.is_attached());
}

#[test]
fn test_globe_drag_rotates_camera() {
    let mut config = small_config();
    config.globe.orbit = OrbitConfig {
        auto_rotate: false,
        ..OrbitConfig::default()
    };
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::Globe, config, &mut host);

    frames(&mut widget, &mut host, 5);
    let resting = widget.kernel().expect("attached").camera().position;
    assert_relative_eq!(resting.x, 0.0, epsilon = 1e-5);

    widget.handle_event(&HostEvent::PointerDown { x: 240.0, y: 240.0 });
    widget.handle_event(&HostEvent::PointerMove { x: 340.0, y: 240.0 });
    widget.handle_event(&HostEvent::PointerUp { x: 340.0, y: 240.0 });
    frames(&mut widget, &mut host, 30);

    let camera = widget.kernel().expect("attached").camera();
    assert!(camera.position.x.abs() > 0.01);
    assert_relative_eq!(camera.position.length(), 6.0, epsilon = 1e-3);
}

#[test]
fn test_floating_crystal_tilts_toward_corner() {
    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut widget = attached(WidgetKind::FloatingCrystal, small_config(), &mut host);

    // Top-right corner of the surface.
    widget.handle_event(&HostEvent::PointerMove { x: 400.0, y: 0.0 });
    frames(&mut widget, &mut host, 200);

    let rotation = widget.kernel().expect("attached").scene().objects()[0]
        .transform
        .rotation;
    assert_relative_eq!(rotation.x, 0.5, epsilon = 1e-3);
    assert_relative_eq!(rotation.y, 0.5, epsilon = 1e-3);
}


#[test]
fn test_inverted_bounds_from_config_do_not_crash() {
    let mut config = small_config();
    config.field.depth.min = 45.0;
    config.field.depth.max = 15.0;
    config.field.depth.easing = 1.5;
    config.globe.orbit = OrbitConfig {
        min_polar: 2.0,
        max_polar: 1.0,
        ..OrbitConfig::default()
    };

    let mut host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut field = attached(WidgetKind::CrystalField, config.clone(), &mut host);
    field.handle_event(&HostEvent::Wheel { delta_y: 1000.0 });
    for _ in 0..50 {
        frames(&mut field, &mut host, 1);
        let depth = field
            .kernel()
            .and_then(|k| k.camera().depth)
            .expect("depth control");
        assert!(depth.actual() <= depth.target());
        assert!(depth.target() >= 15.0 && depth.target() <= 45.0);
    }

    let mut globe_host = LocalHost::new(ContainerRect::sized(400.0, 400.0));
    let mut globe = attached(WidgetKind::Globe, config, &mut globe_host);
    frames(&mut globe, &mut globe_host, 10);
    assert_eq!(globe.state(), LifecycleState::Attached);
}
