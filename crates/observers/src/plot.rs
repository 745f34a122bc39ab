//! Plotting observer for visualizing a hover run.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints};
use hover_core::Observer;
use hover_sim::Event;

/// Configuration for rendering a [`PlotObserver`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Hover").legend().setpoint(6.0))?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    setpoint: Option<f64>,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, no setpoint line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            setpoint: None,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Draws a horizontal reference line at the target altitude.
    #[must_use]
    pub fn setpoint(mut self, setpoint: f64) -> Self {
        self.setpoint = Some(setpoint);
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts plottable data from an event.
///
/// Return `None` from [`x`][Plottable::x] to skip the event entirely; return
/// `None` in a trace slot to skip that trace for the event.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Plots altitude (m) and thrust (N) against time (s).
impl Plottable<2> for Event {
    fn x(&self) -> Option<f64> {
        Some(self.record.time)
    }

    fn traces(&self) -> [Option<f64>; 2] {
        [Some(self.record.position), Some(self.record.thrust)]
    }
}

/// An observer that collects trace data during a run and displays it via egui.
///
/// The const generic `N` is the number of traces. Record data by either
/// passing `&mut PlotObserver` to [`Simulation::run`] (for events that
/// implement [`Plottable<N>`][Plottable]) or by calling
/// [`record`][PlotObserver::record] from a closure.
///
/// # Example
///
/// ```ignore
/// let mut obs = PlotObserver::<2>::new(["Altitude", "Thrust"]);
/// Simulation::new(config).run(&mut obs);
/// obs.show(ShowConfig::new().title("Hover").legend().setpoint(6.0))?;
/// ```
///
/// [`Simulation::run`]: hover_sim::Simulation::run
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates a new `PlotObserver` with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records a single data point across all traces.
    ///
    /// For each trace slot, `None` skips recording for that trace while
    /// leaving other traces unaffected.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (i, y) in traces.into_iter().enumerate() {
            if let Some(y) = y {
                self.data[i].push([x, y]);
            }
        }
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(PlotApp {
                    traces,
                    legend: config.legend,
                    setpoint: config.setpoint,
                }))
            }),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Allows `&mut PlotObserver<N>` to be passed to a simulation that takes its
/// observer by value, so [`PlotObserver::show`] can be called after the run.
impl<const N: usize, E, A> Observer<E, A> for &mut PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    legend: bool,
    setpoint: Option<f64>,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("hover_plot").x_axis_label("time (s)");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            let setpoint = self.setpoint;
            plot.show(ui, |plot_ui| {
                if let Some(setpoint) = setpoint {
                    plot_ui.hline(HLine::new(setpoint).name("Setpoint"));
                }
                for (name, points) in &self.traces {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}
