use anyhow::{Context, Result};
use clap::Parser;
use glam::{IVec2, Vec2, Vec3};
use log::{info, warn};
use serde::Serialize;

use viewport_camera::cli::Cli;
use viewport_camera::config::{load_script, ViewportConfig};
use viewport_camera::controller::CameraController;
use viewport_camera::input::PointerEvent;
use viewport_camera::math::{Box3, Matrix4};

// === Output ===

/// Camera state after the script has been replayed.
#[derive(Serialize, Debug)]
struct Report {
    position: Vec3,
    view_direction: Vec3,
    up_direction: Vec3,
    centre_of_interest: f32,
    viewport: IVec2,
    fov: f32,
    screen_window: [Vec2; 2],
    transform: Matrix4,
    view: Matrix4,
    projection: Matrix4,
    events_applied: usize,
}

impl Report {
    fn new(controller: &CameraController<'_>, events_applied: usize) -> Self {
        let camera = controller.camera();
        let window = controller.screen_window();
        Self {
            position: camera.position(),
            view_direction: camera.view_direction(),
            up_direction: camera.up_direction(),
            centre_of_interest: controller.centre_of_interest(),
            viewport: controller.viewport(),
            fov: controller.fov(),
            screen_window: [window.min, window.max],
            transform: *camera.transform(),
            view: controller.view_matrix(),
            projection: controller.projection_matrix(),
            events_applied,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewportConfig::default(),
    };

    let events: Vec<PointerEvent> = match &cli.script {
        Some(path) => load_script(path)
            .with_context(|| format!("Failed to load script {}", path.display()))?,
        None => Vec::new(),
    };

    let mut camera = config.build_camera();
    let aimed = config.camera.look_at.map(|target| (*camera.transform(), target));

    let mut controller = CameraController::new(&mut camera);
    if let Some((transform, target)) = aimed {
        controller.camera_mut().set_transform(transform);
        controller.focus_on(target);
    }
    controller.set_viewport(cli.viewport.unwrap_or_else(|| config.viewport()));

    if cli.frame {
        controller.frame(&Box3::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
    }

    info!("replaying {} events", events.len());
    let mut applied = 0;
    for event in &events {
        if controller.handle_event(event) {
            applied += 1;
        }
    }

    if let (true, Some(last)) = (controller.is_moving(), events.last()) {
        warn!("script ended mid-gesture, finishing at {}", last.position());
        controller.motion_end(last.position());
    }

    let report = Report::new(&controller, applied);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
