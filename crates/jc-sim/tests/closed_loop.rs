//! Integration tests: controllers closing the loop over joint dynamics.
//!
//! Covers:
//! - velocity mode tracks scripted set-points kinematically
//! - force mode with restoring gains settles on the set-point
//! - paused ticks and backward seeks leave joints untouched
//! - a misconfigured controller is disabled while the rest of the world runs
//! - structurally invalid worlds are rejected before anything is spawned

use std::path::Path;

use jc_controls::{JointController, JointControllerConfig, StepOutcome};
use jc_core::{UpdateInfo, as_secs, s};
use jc_ecs::{AxisRecord, JointVelocity, JointVelocityCmd, Model, ModelTag};
use jc_project::{World, load_yaml, parse_yaml};
use jc_sim::{JointDynamics, ScheduledCommand, SimError, SimOptions, Simulation, build};

fn world(name: &str) -> World {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../worlds")
        .join(name);
    load_yaml(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e))
}

fn opts(t_end: f64) -> SimOptions {
    SimOptions {
        dt: 1e-3,
        t_end,
        max_steps: 1_000_000,
        record_every: 100,
    }
}

#[test]
fn velocity_mode_tracks_scripted_set_points() {
    let (mut sim, schedule) = build(&world("01_cart_velocity.yaml")).unwrap();
    assert_eq!(sim.system_count(), 3);

    let record = sim.run(&opts(1.0), &schedule).unwrap();

    let early = record
        .joint("cart/left_wheel")
        .find(|s| s.t > 0.2 && s.t < 0.4)
        .unwrap();
    assert_eq!(early.velocity, Some(0.5));
    assert_eq!(early.velocity_cmd, Some(0.5));

    let left = record.last("cart/left_wheel").unwrap();
    let right = record.last("cart/right_wheel").unwrap();
    assert!(left.t >= 1.0 - 1e-9 && left.t < 1.0 + 2e-3);
    assert_eq!(left.velocity, Some(1.0));
    assert_eq!(right.velocity, Some(-1.0));
    assert!(left.force_cmd.is_none());
}

#[test]
fn force_mode_settles_on_set_point() {
    let (mut sim, schedule) = build(&world("02_arm_force_pid.yaml")).unwrap();

    let record = sim.run(&opts(3.0), &schedule).unwrap();
    let last = record.last("arm/shoulder").unwrap();
    let v = last.velocity.unwrap();
    assert!((v - 2.0).abs() < 1e-2, "v = {v}");
    assert!(last.velocity_cmd.is_none());
    // Holding 2.0 against damping 0.5 takes a force of 1.0.
    assert!((last.force_cmd.unwrap() - 1.0).abs() < 5e-2);

    // Continue past the second set-point.
    let record = sim.run(&opts(6.0), &schedule).unwrap();
    let v = record.last("arm/shoulder").unwrap().velocity.unwrap();
    assert!((v + 1.0).abs() < 1e-2, "v = {v}");
}

#[test]
fn force_never_exceeds_command_limits() {
    let (mut sim, schedule) = build(&world("02_arm_force_pid.yaml")).unwrap();
    let record = sim.run(&opts(4.0), &schedule).unwrap();

    assert!(
        record
            .joint("arm/shoulder")
            .filter_map(|s| s.force_cmd)
            .all(|f| (-50.0..=50.0).contains(&f))
    );
}

#[test]
fn paused_and_rewound_ticks_hold_state() {
    let (mut sim, schedule) = build(&world("02_arm_force_pid.yaml")).unwrap();
    sim.run(&opts(1.0), &schedule).unwrap();
    let before = sim.snapshot();

    sim.set_paused(true);
    for _ in 0..10 {
        sim.step(s(1e-3));
    }
    let paused = sim.snapshot();
    assert_eq!(paused, before);

    sim.set_paused(false);
    sim.seek(s(0.5));
    let info = sim.step(s(1e-3));
    assert!(info.is_rewind());
    assert!((as_secs(sim.sim_time()) - 0.5).abs() < 1e-12);

    // Physics does not integrate backwards.
    let after = sim.snapshot();
    assert_eq!(after[0].velocity, before[0].velocity);
}

#[test]
fn controller_added_by_hand() {
    let mut sim = Simulation::new();
    let model = Model::spawn(sim.ecm_mut(), "cart").unwrap();
    let joint = model.add_joint(sim.ecm_mut(), "wheel").unwrap();

    let ctrl = JointController::new(
        model,
        JointControllerConfig::new("wheel").with_topic("cmd"),
        sim.ecm(),
        sim.node(),
    )
    .unwrap();
    sim.add_system(ctrl);
    sim.add_system(JointDynamics::new(1.0, 0.0).unwrap());

    let schedule = [ScheduledCommand {
        time: 0.0,
        topic: "/cmd".to_string(),
        value: 4.0,
    }];
    sim.run(&opts(0.01), &schedule).unwrap();

    let ecm = sim.ecm();
    assert_eq!(
        ecm.component::<JointVelocityCmd>(joint).and_then(|c| c.axis0()),
        Some(4.0)
    );
    assert_eq!(
        ecm.component::<JointVelocity>(joint).and_then(|c| c.axis0()),
        Some(4.0)
    );
}

const MIXED_WORLD: &str = r#"
version: 1
name: mixed
models:
  - name: cart
    joints:
      - name: wheel
    plugins:
      - type: joint_controller
        params:
          joint_name: wheel
          initial_velocity: 1.5
  - name: arm
    joints:
      - name: elbow
    plugins:
      - type: joint_controller
        params:
          joint_name: ""
          use_force_commands: true
"#;

#[test]
fn misconfigured_controller_is_disabled_not_fatal() {
    let world = parse_yaml(MIXED_WORLD).unwrap();
    let (mut sim, schedule) = build(&world).unwrap();
    assert_eq!(sim.system_count(), 3);

    let record = sim.run(&opts(0.1), &schedule).unwrap();

    let cart = record.last("cart/wheel").unwrap();
    assert_eq!(cart.velocity_cmd, Some(1.5));
    assert_eq!(cart.velocity, Some(1.5));

    let arm = record.last("arm/elbow").unwrap();
    assert_eq!(arm.velocity, None);
    assert_eq!(arm.velocity_cmd, None);
    assert_eq!(arm.force_cmd, None);

    // The same parameters yield a controller that never acts.
    let arm_entity = sim
        .ecm()
        .entities_with::<ModelTag>()
        .into_iter()
        .find(|&e| Model::new(e).name(sim.ecm()) == Some("arm"))
        .unwrap();
    let mut ctrl = JointController::configure(
        arm_entity,
        &world.models[1].plugins[0].params,
        sim.ecm(),
        sim.node(),
    );
    assert!(!ctrl.is_enabled());
    assert_eq!(
        ctrl.step(&UpdateInfo::with_dt(s(1e-3)), sim.ecm_mut()),
        StepOutcome::Disabled
    );
}

#[test]
fn structurally_invalid_world_is_rejected() {
    let mut world = parse_yaml(MIXED_WORLD).unwrap();
    world.models[1].name = "cart".to_string();

    assert!(matches!(build(&world), Err(SimError::Project { .. })));
}

#[test]
fn unsubscribed_command_is_skipped() {
    let (mut sim, _) = build(&world("01_cart_velocity.yaml")).unwrap();
    let schedule = [ScheduledCommand {
        time: 0.0,
        topic: "/nobody/listens".to_string(),
        value: 9.0,
    }];

    let record = sim.run(&opts(0.1), &schedule).unwrap();
    assert_eq!(record.last("cart/left_wheel").unwrap().velocity, Some(0.5));
}
