#![warn(clippy::pedantic)]

use std::f64::consts::PI;

use approx::assert_relative_eq;
use beamx::{
    beam_deflection, displacement, BeamConfig, Connectivity, ControlEvent, HeadlessRenderer,
    ModeShape, Session,
};

fn build_session(node_count: usize) -> (Session, HeadlessRenderer) {
    let config = BeamConfig {
        node_count,
        mode: 2.5,
        omega: 1.0,
        time_step: 2.0 * PI / 40.0,
        ..BeamConfig::default()
    };
    let session = Session::new(&config).expect("valid config");
    let renderer = session.headless_renderer();
    (session, renderer)
}

#[test]
fn forty_ticks_complete_one_period() {
    let (mut session, mut renderer) = build_session(11);
    let stations = session.beam().stations();
    let at_rest = beam_deflection(&ModeShape::new(2.5, 1.0), &stations, 0.0);

    for _ in 0..40 {
        assert!(session.tick(&mut renderer));
    }

    assert_relative_eq!(session.params().current_time(), 2.0 * PI, epsilon = 1.0e-12);
    let after = session.deflection_at(session.params().current_time());
    for (actual, expected) in after.iter().zip(&at_rest) {
        assert_relative_eq!(*actual, *expected, epsilon = 1.0e-9);
    }
    assert_eq!(renderer.presented(), 40);
}

#[test]
fn mid_period_deflection_matches_mode_shape() {
    let (mut session, mut renderer) = build_session(11);
    for _ in 0..10 {
        session.tick(&mut renderer);
    }
    // A quarter period puts sin(omega * t) at its peak.
    let tip = *session.beam().deflections().last().expect("tip node");
    assert_relative_eq!(tip, displacement(2.5, 1.0), epsilon = 1.0e-9);
    assert_eq!(session.beam().deflections()[0], 0.0);
}

#[test]
fn mesh_size_follows_node_count() {
    for node_count in [2, 11, 21] {
        let (mut session, mut renderer) = build_session(node_count);
        session.tick(&mut renderer);
        let frame = renderer.frame();
        assert_eq!(frame.faces.len(), 6 * (node_count - 1));
        assert_eq!(frame.points.len(), 24 * (node_count - 1));
        match &frame.connectivity {
            Connectivity::Polygons(cells) => assert_eq!(cells.len(), frame.faces.len()),
            Connectivity::Lines(_) => panic!("solid expected"),
        }
    }
}

#[test]
fn pause_freezes_time_and_frames() {
    let (mut session, mut renderer) = build_session(11);
    session.tick(&mut renderer);
    session
        .dispatch(ControlEvent::TogglePlay, &mut renderer)
        .expect("not a pick");
    let time = session.params().current_time();
    for _ in 0..5 {
        assert!(!session.tick(&mut renderer));
    }
    assert_eq!(session.params().current_time(), time);
    assert_eq!(renderer.presented(), 1);

    session
        .dispatch(ControlEvent::TogglePlay, &mut renderer)
        .expect("not a pick");
    assert!(session.tick(&mut renderer));
    assert_relative_eq!(session.params().current_time(), time + 2.0 * PI / 40.0);
}

#[test]
fn console_parameters_survive_bad_index() {
    let (mut session, mut renderer) = build_session(5);
    {
        let mut console = session.console();
        console.set_function(|x, t, p| p[0] * x + p[1] * t, vec![1.0, 0.0]);
        console.set_function_param(99, 1.0);
        assert_eq!(console.function_params(), Some(&[1.0, 0.0][..]));
        console.set_time_step(0.5).expect("positive step");
    }
    session.tick(&mut renderer);
    assert_eq!(session.params().current_time(), 0.5);
    assert_eq!(session.beam().deflections(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn large_modes_stay_finite_on_the_beam() {
    let config = BeamConfig {
        node_count: 21,
        mode: 40.0,
        mode_max: 50.0,
        ..BeamConfig::default()
    };
    let mut session = Session::new(&config).expect("valid config");
    let mut renderer = session.headless_renderer();
    for _ in 0..3 {
        session.tick(&mut renderer);
    }
    assert!(session.beam().deflections().iter().all(|y| y.is_finite()));
}
