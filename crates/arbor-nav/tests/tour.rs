//! Detour round-trip: leaving the itinerary always returns to the stop
//! that was active before the detour began.

use arbor_input::{InputHub, MouseButton};
use arbor_nav::{Controller, NavEvent, Stop, TourControls};
use arbor_scene::{Camera, NodeId, SceneGraph, SceneNode};
use glam::{Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

fn scene_with_boards() -> (SceneGraph, Vec<Stop>, NodeId) {
    let mut scene = SceneGraph::new();
    let board = |scene: &mut SceneGraph, x: f32| {
        let root = scene.insert(None, SceneNode::group(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY));
        for i in 0..3 {
            scene.insert(
                Some(root),
                SceneNode::mesh(
                    Vec3::new(i as f32 - 1.0, i as f32 * 0.5, 0.0),
                    Quat::IDENTITY,
                    Vec3::splat(0.3),
                ),
            );
        }
        root
    };
    let left = board(&mut scene, -6.0);
    let right = board(&mut scene, 6.0);
    let lone = scene.insert(
        None,
        SceneNode::mesh(Vec3::new(0.0, 8.0, 0.0), Quat::IDENTITY, Vec3::splat(0.4)),
    );
    let stops = vec![
        Stop {
            targets: vec![left],
            orientation: Quat::IDENTITY,
            min_distance: 3.0,
        },
        Stop {
            targets: vec![right],
            orientation: Quat::from_rotation_y(0.3),
            min_distance: 3.0,
        },
    ];
    (scene, stops, lone)
}

fn settle(controls: &mut TourControls, camera: &mut Camera, scene: &mut SceneGraph) {
    for _ in 0..100 {
        controls.update(camera, scene, 16.0);
    }
    assert!(!controls.transitioning());
}

#[test]
fn test_detour_round_trip_restores_stop_framing() {
    let (mut scene, stops, lone) = scene_with_boards();
    let mut camera = Camera::new(800.0, 600.0);
    let mut controls = TourControls::new();
    controls.set_itinerary(stops);

    // Reference framing: travel to stop 1 directly.
    controls.jump_to(&scene, &camera, 1);
    settle(&mut controls, &mut camera, &mut scene);
    let direct = camera.transform;

    // Detour away, then return.
    controls.detour(&scene, &camera, &[lone], Quat::from_rotation_x(0.5), 2.0);
    assert!(controls.detour_active());
    settle(&mut controls, &mut camera, &mut scene);
    assert!(
        !camera.transform.approx_eq(&direct, 1e-2, 1e-3),
        "the detour actually moved the camera"
    );

    controls.end_detour(&scene, &camera);
    assert!(!controls.detour_active());
    settle(&mut controls, &mut camera, &mut scene);
    assert!(
        camera.transform.approx_eq(&direct, 1e-3, 1e-4),
        "return framing matches a direct jump"
    );
    assert_eq!(controls.current_index(), 1);
}

#[test]
fn test_navigate_fires_on_each_arrival() {
    let (mut scene, stops, lone) = scene_with_boards();
    let stop0_targets = stops[0].targets.clone();
    let mut camera = Camera::new(800.0, 600.0);
    let mut controls = TourControls::new();
    controls.set_itinerary(stops);

    let events: Rc<RefCell<Vec<NavEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    controls.on_event(move |event| sink.borrow_mut().push(event.clone()));

    controls.jump_to(&scene, &camera, 0);
    settle(&mut controls, &mut camera, &mut scene);
    controls.detour(&scene, &camera, &[lone], Quat::IDENTITY, 2.0);
    settle(&mut controls, &mut camera, &mut scene);
    controls.end_detour(&scene, &camera);
    settle(&mut controls, &mut camera, &mut scene);

    let navigates: Vec<Vec<NodeId>> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            NavEvent::Navigate { targets } => Some(targets.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        navigates,
        vec![stop0_targets.clone(), vec![lone], stop0_targets],
        "arrivals announce the new observed location"
    );

    // Navigate always lands before the closing transition toggle.
    let borrowed = events.borrow();
    let nav_idx = borrowed
        .iter()
        .position(|e| matches!(e, NavEvent::Navigate { .. }))
        .unwrap();
    assert!(matches!(
        borrowed[nav_idx + 1],
        NavEvent::TransitionChange {
            transitioning: false
        }
    ));
}

#[test]
fn test_right_click_ends_detour_through_input() {
    let (mut scene, stops, lone) = scene_with_boards();
    let mut camera = Camera::new(800.0, 600.0);
    let mut hub = InputHub::new(800.0, 600.0);
    let mut controls = TourControls::new();
    controls.connect(&mut hub);
    controls.set_itinerary(stops);

    controls.jump_to(&scene, &camera, 1);
    settle(&mut controls, &mut camera, &mut scene);
    let framed = camera.transform;

    controls.detour(&scene, &camera, &[lone], Quat::IDENTITY, 2.0);
    settle(&mut controls, &mut camera, &mut scene);

    hub.button_pressed(MouseButton::Right);
    controls.update(&mut camera, &mut scene, 16.0);
    assert!(!controls.detour_active());
    settle(&mut controls, &mut camera, &mut scene);
    assert!(camera.transform.approx_eq(&framed, 1e-3, 1e-4));
}

#[test]
fn test_interrupted_detour_still_returns_cleanly() {
    // Ending a detour mid-flight cancels the outbound animation; the
    // camera still lands on the saved stop's framing.
    let (mut scene, stops, lone) = scene_with_boards();
    let mut camera = Camera::new(800.0, 600.0);
    let mut controls = TourControls::new();
    controls.set_itinerary(stops);

    controls.jump_to(&scene, &camera, 0);
    settle(&mut controls, &mut camera, &mut scene);
    let framed = camera.transform;

    controls.detour(&scene, &camera, &[lone], Quat::IDENTITY, 2.0);
    for _ in 0..5 {
        controls.update(&mut camera, &mut scene, 16.0);
    }
    assert!(controls.transitioning());

    controls.end_detour(&scene, &camera);
    settle(&mut controls, &mut camera, &mut scene);
    assert!(camera.transform.approx_eq(&framed, 1e-3, 1e-4));
}
