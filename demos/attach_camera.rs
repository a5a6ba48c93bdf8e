use beamx::{Axis, BeamConfig, ControlEvent, Perspective, Renderer, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(&BeamConfig::default())?;
    let mut renderer = session.headless_renderer();

    // Start from the isometric preset
    session.dispatch(ControlEvent::Perspective(Perspective::Iso), &mut renderer)?;

    // Ride on node 5 looking at the free end, a little above the beam
    session.dispatch(ControlEvent::SetDeltaOffset(Axis::Y, 3.0), &mut renderer)?;
    session.dispatch(ControlEvent::ToggleAttachMode, &mut renderer)?;
    let nodes: Vec<_> = session.beam().node_indices().collect();
    for node in [nodes[5], nodes[20]] {
        let response = session.dispatch(ControlEvent::Pick(Some(node)), &mut renderer)?;
        println!("{response:?}");
    }

    for tick in 1..=20 {
        session.tick(&mut renderer);
        if tick % 5 == 0 {
            let camera = renderer.camera();
            println!(
                "tick {tick:>2}: eye y = {:+.3}, focal y = {:+.3}",
                camera.position.y, camera.focal_point.y
            );
        }
    }

    // Releasing puts the camera back at the default pose
    session.dispatch(ControlEvent::ToggleAttachMode, &mut renderer)?;
    println!("released: {:?}", renderer.camera());

    Ok(())
}
