use cornu_core::CornuError;
use cornu_math::{DVec3, Point3, Transform};
use cornu_render::animation::{frame_delta_ms, DriverState};
use cornu_render::backend::{Primitive, UniformValue};
use cornu_render::pipeline::names;
use cornu_render::{Control, Key, ManualScheduler, RecordingBackend, SceneConfig, Viewer};

type TestViewer = Viewer<RecordingBackend, ManualScheduler>;

fn viewer_with(config: SceneConfig) -> TestViewer {
    Viewer::new(RecordingBackend::new(), ManualScheduler::new(), config).unwrap()
}

fn small_viewer() -> TestViewer {
    viewer_with(SceneConfig {
        subdivisions: 8,
        ..SceneConfig::default()
    })
}

/// Pop the next scheduled frame and deliver it.
fn run_frame(viewer: &mut TestViewer) -> bool {
    let (handle, _) = viewer.scheduler_mut().pop().expect("no frame scheduled");
    viewer.on_frame(handle)
}

#[test]
fn test_initial_frame_draws_surface_once_tessellated() {
    let viewer = viewer_with(SceneConfig::default());
    let draws = viewer.backend().frame_draws();

    assert_eq!(draws.len(), 2, "light line and surface");
    assert_eq!(draws[0].primitive, Primitive::LineStrip);
    assert_eq!(draws[0].count, 2);
    assert_eq!(draws[1].primitive, Primitive::Triangles);
    assert_eq!(draws[1].count, 6 * 51 * 51);
    assert_eq!(viewer.stats().cells, 51 * 51);
    assert_eq!(viewer.frames_drawn(), 1);
}

#[test]
fn test_controls_redraw_without_retessellation() {
    let mut viewer = small_viewer();
    let uploads = viewer.backend().uploads;

    assert!(viewer.handle(Control::Key(Key::Right)));
    assert!(viewer.handle(Control::Shininess(3)));
    assert!(!viewer.handle(Control::Wheel(-100_000.0)));

    assert_eq!(viewer.backend().uploads, uploads);
    assert_eq!(viewer.frames_drawn(), 3);
    assert!((viewer.config().translation.x - 0.1).abs() < 1e-12);

    let program = viewer.renderer().surface_program();
    assert_eq!(
        viewer.backend().uniform(program, names::MAT_SHININESS),
        Some(UniformValue::Float(3.0))
    );
}

#[test]
fn test_rotation_updates_normal_matrix_only() {
    let mut viewer = small_viewer();
    let uploads = viewer.backend().uploads;
    let program = viewer.renderer().surface_program();
    let before = viewer.backend().uniform(program, names::WORLD_INVERSE_TRANSPOSE);

    let rotation = Transform::from_axis_angle(DVec3::Y, 0.5);
    viewer.set_rotation(rotation);

    let after = viewer.backend().uniform(program, names::WORLD_INVERSE_TRANSPOSE);
    assert_ne!(before, after);
    // Rigid rotation: the normal matrix is the rotation itself
    assert_eq!(after, Some(UniformValue::Mat4(rotation.inverse_transpose().to_cols_array_f32())));
    assert_eq!(viewer.backend().uploads, uploads);
    assert_eq!(viewer.frames_drawn(), 2);
}

#[test]
fn test_path_overlay_toggle() {
    let mut viewer = small_viewer();
    assert!(viewer.handle(Control::TogglePath));
    assert!(viewer.config().show_path);
    assert_eq!(viewer.backend().frame_draws().len(), 3);

    viewer.handle(Control::TogglePath);
    assert_eq!(viewer.backend().frame_draws().len(), 2);
}

#[test]
fn test_animation_ticks_rebuild_light_line() {
    let mut viewer = small_viewer();
    let uploads = viewer.backend().uploads;

    viewer.handle(Control::ToggleAnimation);
    assert!(viewer.driver().is_running());
    assert_eq!(viewer.animation().elapsed_ms, 0.0);
    assert_eq!(viewer.scheduler_mut().pending(), 1);

    for _ in 0..6 {
        assert!(run_frame(&mut viewer));
        assert_eq!(viewer.scheduler_mut().pending(), 1);
    }
    assert_eq!(viewer.backend().uploads, uploads + 6);
    assert!((viewer.animation().elapsed_ms - 6.0 * frame_delta_ms()).abs() < 1e-9);

    let light = viewer.animation().light_position;
    assert!(light.x > 0.0 && (light.x - light.y).abs() < 1e-12);
    assert_eq!(light.z, 5.0);
}

#[test]
fn test_stop_cancels_and_resume_continues() {
    let mut viewer = small_viewer();
    viewer.handle(Control::ToggleAnimation);
    for _ in 0..10 {
        run_frame(&mut viewer);
    }
    let light_at_stop = viewer.animation().light_position;
    let elapsed_at_stop = viewer.animation().elapsed_ms;

    viewer.handle(Control::ToggleAnimation);
    assert_eq!(viewer.driver().state(), DriverState::Stopped);
    assert_eq!(viewer.scheduler_mut().pending(), 0);
    assert_eq!(viewer.animation().light_position, light_at_stop);
    assert_ne!(light_at_stop, Point3::new(0.0, 0.0, 5.0));

    viewer.handle(Control::ToggleAnimation);
    assert!(viewer.driver().is_running());
    run_frame(&mut viewer);
    // Clock picks up where it stopped; nothing is reset
    assert!((viewer.animation().elapsed_ms - (elapsed_at_stop + frame_delta_ms())).abs() < 1e-9);
    let resumed = viewer.animation().light_position;
    assert!((resumed - light_at_stop).length() < 0.2, "jumped from {light_at_stop:?} to {resumed:?}");
}

#[test]
fn test_stale_frame_after_stop_is_ignored() {
    let mut viewer = small_viewer();
    viewer.handle(Control::ToggleAnimation);
    let frames = viewer.frames_drawn();
    let (stale, _) = viewer.scheduler_mut().pop().unwrap();
    viewer.handle(Control::ToggleAnimation);

    assert!(!viewer.on_frame(stale));
    assert_eq!(viewer.frames_drawn(), frames);
}

#[test]
fn test_light_direction_tracks_animation() {
    let mut viewer = small_viewer();
    viewer.handle(Control::ToggleAnimation);
    for _ in 0..20 {
        run_frame(&mut viewer);
    }
    let program = viewer.renderer().surface_program();
    let Some(UniformValue::Vec3(dir)) = viewer.backend().uniform(program, names::LIGHT_DIRECTION) else {
        panic!("light direction not set");
    };
    let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
    assert!((len - 1.0).abs() < 1e-5);
    assert!(dir[2] < 0.0);
}

#[test]
fn test_shader_link_failure_is_fatal() {
    let mut backend = RecordingBackend::new();
    backend.fail_link = Some("bad varying".to_string());
    let err = Viewer::new(backend, ManualScheduler::new(), SceneConfig::default())
        .err()
        .expect("init should fail");
    assert!(matches!(err, CornuError::ShaderLink(ref log) if log == "bad varying"));
    assert!(err.is_fatal());
}

#[test]
fn test_invalid_config_rejected_before_tessellation() {
    let config = SceneConfig {
        subdivisions: 0,
        ..SceneConfig::default()
    };
    let result = Viewer::new(RecordingBackend::new(), ManualScheduler::new(), config);
    assert!(matches!(result, Err(CornuError::InvalidConfig(_))));
}
