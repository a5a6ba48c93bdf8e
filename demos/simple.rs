use beamx::{displacement, BeamConfig, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Sample the bare mode shape along the span
    for step in 0..=4 {
        let x = f64::from(step) / 4.0;
        println!("y({x:.2}) = {:+.4}", displacement(2.5, x));
    }

    // Animate a short beam for a quarter period
    let config = BeamConfig {
        node_count: 11,
        ..BeamConfig::default()
    };
    let mut session = Session::new(&config)?;
    let mut renderer = session.headless_renderer();
    for _ in 0..10 {
        session.tick(&mut renderer);
    }

    let tip = session.beam().deflections().last().copied().unwrap_or_default();
    println!(
        "t = {:.3}: tip deflection {tip:+.4}, {} quads",
        session.params().current_time(),
        renderer.frame().faces.len()
    );

    Ok(())
}
