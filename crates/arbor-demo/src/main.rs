//! Headless demo: drives the navigation controllers through a scripted
//! interaction session against a two-board node-tree scene.
//!
//! Run with `cargo run -p arbor-demo`; pass `--log-level debug` to watch
//! every controller decision, or `--tween-duration 100` to speed travel up.

use clap::Parser;
use glam::{Quat, Vec2, Vec3};
use std::path::PathBuf;
use tracing::info;

use arbor_config::{CliArgs, Config};
use arbor_input::{InputHub, MouseButton};
use arbor_math::Transform;
use arbor_nav::{
    Controller, FitAxis, FitControls, Stop, TargetControls, TourControls, elevation_facing,
};
use arbor_scene::{Camera, NodeId, SceneGraph, SceneNode};
use arbor_tween::TweenGroup;

/// Build one board: a root group with a three-level branching tree of node
/// meshes connected by limb lines.
fn build_board(scene: &mut SceneGraph, label: &str, origin: Vec3) -> NodeId {
    let facing = elevation_facing(Vec3::Y);
    let root = scene.insert_labeled(None, label, SceneNode::group(origin, Quat::IDENTITY));
    let trunk = scene.insert_labeled(
        Some(root),
        format!("{label}/trunk"),
        SceneNode::mesh(Vec3::ZERO, facing, Vec3::splat(0.4)),
    );
    for (i, x) in [-1.5_f32, 1.5].into_iter().enumerate() {
        let limb_anchor = Vec3::new(x * 0.5, 1.0, 0.0);
        scene.insert(Some(trunk), SceneNode::line(limb_anchor, Vec3::new(0.05, 0.6, 0.05)));
        let branch = scene.insert_labeled(
            Some(trunk),
            format!("{label}/branch{i}"),
            SceneNode::mesh(Vec3::new(x, 2.0, 0.0), facing, Vec3::splat(0.3)),
        );
        for (j, leaf_x) in [-0.6_f32, 0.6].into_iter().enumerate() {
            scene.insert(
                Some(branch),
                SceneNode::line(Vec3::new(leaf_x * 0.5, 0.75, 0.0), Vec3::new(0.04, 0.4, 0.04)),
            );
            scene.insert_labeled(
                Some(branch),
                format!("{label}/branch{i}/leaf{j}"),
                SceneNode::mesh(Vec3::new(leaf_x, 1.5, 0.0), facing, Vec3::splat(0.2)),
            );
        }
    }
    root
}

/// Advance the live controller over fixed 16 ms ticks until its animation
/// settles.
fn settle(controller: &mut dyn Controller, camera: &mut Camera, scene: &mut SceneGraph) {
    for _ in 0..200 {
        controller.update(camera, scene, 16.0);
        if !controller.transitioning() {
            break;
        }
    }
}

/// Synthesize a primary click on the screen point `node` projects to.
fn click_node(hub: &mut InputHub, camera: &Camera, scene: &SceneGraph, node: NodeId) {
    let (world, _) = scene.world_pose(node);
    let clip = camera.projection_matrix() * camera.view_matrix() * world.extend(1.0);
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    let (w, h) = hub.viewport();
    hub.cursor_moved((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h);
    hub.button_pressed(MouseButton::Left);
}

fn pose_line(camera: &Camera) -> String {
    let Transform { position, rotation } = camera.transform;
    format!(
        "pos ({:.2}, {:.2}, {:.2}) rot ({:.2}, {:.2}, {:.2}, {:.2})",
        position.x, position.y, position.z, rotation.x, rotation.y, rotation.z, rotation.w
    )
}

fn main() {
    let args = CliArgs::parse();
    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config"));
    let mut config = Config::load_or_create(&config_dir).unwrap_or_default();
    config.apply_cli_overrides(&args);

    arbor_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let mut scene = SceneGraph::new();
    let ours = build_board(&mut scene, "ours", Vec3::new(-4.0, 0.0, 0.0));
    let theirs = build_board(&mut scene, "theirs", Vec3::new(4.0, 0.0, 0.0));
    info!(nodes = scene.len(), "scene built");

    let mut camera = Camera::with_fov(
        config.camera.fov_y_degrees.to_radians(),
        config.camera.viewport_width,
        config.camera.viewport_height,
    );
    camera.transform = Transform::new(Vec3::new(0.0, 1.0, 16.0), Quat::IDENTITY);
    let mut hub = InputHub::new(config.camera.viewport_width, config.camera.viewport_height);

    // ── Stage 1: frame both boards ──────────────────────────────────
    info!("stage 1: elevation fit over both boards");
    let mut fit = FitControls::new(FitAxis::Elevation);
    fit.duration_ms = config.navigation.tween_duration_ms;
    fit.connect(&mut hub);
    fit.set_targets(&scene, &camera, &[ours, theirs])
        .expect("fit accepts any target set");
    settle(&mut fit, &mut camera, &mut scene);
    info!("framed both boards: {}", pose_line(&camera));
    fit.dispose();

    // ── Stage 2: select around our board ────────────────────────────
    info!("stage 2: selection on our board");
    let mut target = TargetControls::new();
    target.duration_ms = config.navigation.tween_duration_ms;
    // Back off further than the config default so the whole board stays in
    // frame for the follow-up clicks below.
    target.camera_offset = config.navigation.camera_offset * 6.0;
    target.connect(&mut hub);
    target
        .set_targets(&scene, &camera, &[ours])
        .expect("board root is a valid target");
    target.on_event(|event| info!(?event, "target controls"));

    let trunk = scene.find("ours/trunk").expect("labeled at build time");
    let branch = scene.find("ours/branch1").expect("labeled at build time");

    click_node(&mut hub, &camera, &scene, trunk);
    target.update(&mut camera, &mut scene, 16.0);
    settle(&mut target, &mut camera, &mut scene);
    info!("selected trunk: {}", pose_line(&camera));

    click_node(&mut hub, &camera, &scene, branch);
    target.update(&mut camera, &mut scene, 16.0);
    settle(&mut target, &mut camera, &mut scene);
    info!("selected branch: {}", pose_line(&camera));

    hub.wheel(winit::event::MouseScrollDelta::LineDelta(0.0, -1.0));
    target.update(&mut camera, &mut scene, 16.0);
    settle(&mut target, &mut camera, &mut scene);
    info!(cursor = ?target.history().cursor(), "stepped back: {}", pose_line(&camera));

    hub.button_pressed(MouseButton::Right);
    target.update(&mut camera, &mut scene, 16.0);
    settle(&mut target, &mut camera, &mut scene);
    info!("selection cleared: {}", pose_line(&camera));
    target.dispose();

    // ── Stage 3: tour both boards with a detour ─────────────────────
    info!("stage 3: itinerary tour with detour");
    let mut tour = TourControls::new();
    tour.duration_ms = config.navigation.tween_duration_ms;
    tour.connect(&mut hub);
    tour.on_event(|event| info!(?event, "tour controls"));
    tour.set_itinerary(vec![
        Stop {
            targets: vec![ours],
            orientation: elevation_facing(Vec3::Y),
            min_distance: 6.0,
        },
        Stop {
            targets: vec![theirs],
            orientation: elevation_facing(Vec3::Y),
            min_distance: 6.0,
        },
    ]);

    tour.jump_to(&scene, &camera, 0);
    settle(&mut tour, &mut camera, &mut scene);
    info!("at our board: {}", pose_line(&camera));

    tour.jump_to(&scene, &camera, 1);
    settle(&mut tour, &mut camera, &mut scene);
    info!("at their board: {}", pose_line(&camera));

    let leaf = scene.find("theirs/branch0/leaf1").expect("labeled at build time");
    tour.detour(
        &scene,
        &camera,
        &[leaf],
        elevation_facing(Vec3::Y),
        config.navigation.selection_distance,
    );
    settle(&mut tour, &mut camera, &mut scene);
    info!("detoured to leaf: {}", pose_line(&camera));

    tour.end_detour(&scene, &camera);
    settle(&mut tour, &mut camera, &mut scene);
    info!("back on itinerary: {}", pose_line(&camera));
    tour.dispose();

    // ── Stage 4: fade the detoured leaf out and back in ─────────────
    info!("stage 4: highlight fade");
    let mut fades = TweenGroup::new();
    fades.animate_opacity(&mut scene, leaf, 0.0, config.navigation.tween_duration_ms);
    for _ in 0..200 {
        if fades.update_fades(&mut scene, 16.0).contains(&leaf) {
            break;
        }
    }
    info!(visible = scene.node(leaf).visible, "leaf faded out");
    fades.animate_opacity(&mut scene, leaf, 1.0, config.navigation.tween_duration_ms);
    for _ in 0..200 {
        if fades.update_fades(&mut scene, 16.0).contains(&leaf) {
            break;
        }
    }
    info!(visible = scene.node(leaf).visible, "leaf restored");

    info!("scripted session complete");
}
