use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use hover_core::{Config, Observer, Params};
use hover_observers::Settled;
use hover_sim::{Action, Event, Simulation, Solution};

use crate::output::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "hover")]
#[command(about = "Closed-loop PID hover simulation of a one-dimensional rocket")]
#[command(version)]
pub struct Args {
    /// TOML file with simulation parameters (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    // ── Parameter overrides ───────────────────────────────────
    #[arg(long)]
    dt: Option<f64>,

    #[arg(long)]
    duration: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    setpoint: Option<f64>,

    #[arg(long)]
    max_thrust: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    initial_position: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    kp: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    ki: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    kd: Option<f64>,

    // ── Early stop ────────────────────────────────────────────
    /// Stop once the altitude stays within this distance of the setpoint (m)
    #[arg(long)]
    settle: Option<f64>,

    /// Consecutive steps inside the settle band required to stop
    #[arg(long, default_value_t = 10, requires = "settle")]
    hold: usize,

    /// Open a plot of altitude and thrust after the run
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the parameter set from the config file and command line overrides.
    fn params(&self) -> Result<Params> {
        let mut params = match &self.config {
            Some(path) => load_params(path)?,
            None => Params::default(),
        };

        let overrides = [
            (&mut params.dt, self.dt),
            (&mut params.duration, self.duration),
            (&mut params.setpoint, self.setpoint),
            (&mut params.max_thrust, self.max_thrust),
            (&mut params.initial_position, self.initial_position),
            (&mut params.kp, self.kp),
            (&mut params.ki, self.ki),
            (&mut params.kd, self.kd),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }

        Ok(params)
    }
}

fn load_params(path: &Path) -> Result<Params> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

pub fn run(args: &Args) -> Result<()> {
    let config = Config::new(args.params()?).context("invalid simulation parameters")?;
    tracing::info!(
        steps = config.step_count(),
        dt = config.dt(),
        setpoint = config.setpoint(),
        "running simulation"
    );

    let mut settled = args
        .settle
        .map(|tolerance| Settled::new(config.setpoint(), tolerance, args.hold));

    #[cfg(feature = "plot")]
    let mut plot = args
        .plot
        .then(|| hover_observers::PlotObserver::<2>::new(["Altitude (m)", "Thrust (N)"]));

    let solution = Simulation::new(config).run(|event: &Event| -> Option<Action> {
        #[cfg(feature = "plot")]
        if let Some(plot) = plot.as_mut() {
            let _: Option<Action> = plot.observe(event);
        }
        settled.as_mut().and_then(|settled| settled.observe(event))
    });

    report(&solution, settled.as_ref());
    write_rows(args, &solution)?;

    #[cfg(feature = "plot")]
    if let Some(plot) = plot {
        plot.show(
            hover_observers::ShowConfig::new()
                .title("hover: altitude and thrust")
                .legend()
                .setpoint(config.setpoint()),
        )
        .map_err(|err| anyhow::anyhow!("failed to open plot window: {err}"))?;
    }

    Ok(())
}

fn report(solution: &Solution, settled: Option<&Settled>) {
    let last = solution.history.last();
    tracing::info!(
        status = ?solution.status,
        steps = solution.steps,
        final_position = last.map(|record| record.position),
        final_velocity = last.map(|record| record.velocity),
        "simulation finished"
    );

    if let Some(settled) = settled {
        match settled.settled_at() {
            Some(time) => tracing::info!(settling_time = time, "altitude settled"),
            None => tracing::warn!("altitude did not settle within the simulated duration"),
        }
    }
}

fn write_rows(args: &Args, solution: &Solution) -> Result<()> {
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    output::write(&solution.history, args.format, writer).context("failed to write trajectory")
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hover").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_reference_params() {
        let args = parse(&[]);
        assert_eq!(args.params().unwrap(), Params::default());
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn overrides_replace_defaults() {
        let args = parse(&["--kp", "1.5", "--setpoint", "-2", "--duration", "10"]);
        let params = args.params().unwrap();

        assert_relative_eq!(params.kp, 1.5);
        assert_relative_eq!(params.setpoint, -2.0);
        assert_relative_eq!(params.duration, 10.0);
        assert_relative_eq!(params.ki, Params::default().ki);
    }

    #[test]
    fn hold_requires_settle() {
        let result = Args::try_parse_from(["hover", "--hold", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let params: Params = toml::from_str("setpoint = 3.0\nkd = 0.5\n").unwrap();

        assert_relative_eq!(params.setpoint, 3.0);
        assert_relative_eq!(params.kd, 0.5);
        assert_relative_eq!(params.dt, 0.1);
        assert_relative_eq!(params.max_thrust, 15.0);
    }

    #[test]
    fn unknown_toml_fields_are_rejected() {
        let result: Result<Params, _> = toml::from_str("thrust = 3.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = load_params(Path::new("/nonexistent/hover.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
