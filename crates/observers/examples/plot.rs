//! Interactive visualizations of hover runs.
//!
//! # Usage
//!
//! ```text
//! cargo run -p hover-observers --example plot --features plot -- step
//! cargo run -p hover-observers --example plot --features plot -- step 0.2
//! cargo run -p hover-observers --example plot --features plot -- tuning
//! ```
//!
//! # Modes
//!
//! - **step [dt]** - The reference run: altitude and thrust against time with
//!   the setpoint drawn in. Try `0.05`, `0.1` (default), `0.3` to see how the
//!   step size changes the response.
//!
//! - **tuning** - Overlays the altitude for several integral gains. A larger
//!   `ki` lifts off sooner and winds up more integral action on the way, so it
//!   overshoots further.

use std::error::Error;

use hover_core::{Config, Params};
use hover_observers::{PlotObserver, ShowConfig};
use hover_sim::{Action, Event, Simulation};

fn main() -> Result<(), Box<dyn Error>> {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "step".into());
    match mode.as_str() {
        "step" => {
            let dt = std::env::args()
                .nth(2)
                .as_deref()
                .map(str::parse::<f64>)
                .transpose()
                .unwrap_or_else(|_| {
                    eprintln!("Invalid step size, expected a number, e.g. 0.1");
                    std::process::exit(1);
                })
                .unwrap_or(0.1);
            step(dt)
        }
        "tuning" => tuning(),
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: plot [step [dt]|tuning]");
            std::process::exit(1);
        }
    }
}

/// Plot altitude and thrust for the reference gains at the given step size.
fn step(dt: f64) -> Result<(), Box<dyn Error>> {
    let config = Config::new(Params {
        dt,
        ..Params::default()
    })?;

    let mut obs = PlotObserver::<2>::new(["Altitude (m)", "Thrust (N)"]);
    Simulation::new(config).run(&mut obs);

    obs.show(
        ShowConfig::new()
            .title(format!("Hover: reference gains, dt={dt}"))
            .legend()
            .setpoint(config.setpoint()),
    )?;

    Ok(())
}

/// Overlay the altitude response for several integral gains.
fn tuning() -> Result<(), Box<dyn Error>> {
    let gains = [1.0 / 35.0, 2.0 / 35.0, 2.0 / 25.0];
    let mut obs = PlotObserver::<3>::new(["ki = 1/35", "ki = 2/35", "ki = 2/25"]);

    for (slot, ki) in gains.into_iter().enumerate() {
        let config = Config::new(Params {
            ki,
            ..Params::default()
        })?;

        Simulation::new(config).run(|event: &Event| -> Option<Action> {
            let mut traces = [None; 3];
            traces[slot] = Some(event.record.position);
            obs.record(event.record.time, traces);
            None
        });
    }

    obs.show(
        ShowConfig::new()
            .title("Hover: integral gain comparison")
            .legend()
            .setpoint(Params::default().setpoint),
    )?;

    Ok(())
}
