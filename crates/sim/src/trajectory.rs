use std::slice;

/// A single `(time, position)` sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Elapsed simulated time (s).
    pub time: f64,

    /// Altitude at that time (m).
    pub position: f64,
}

/// The ordered altitude record of a run.
///
/// Points can only be appended, one per step, so the record always reads in
/// time order. Renderers and plotters consume it read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trajectory with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Appends a point to the end of the record.
    pub fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }

    #[must_use]
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Returns the altitude at the end of the record, if any step ran.
    #[must_use]
    pub fn final_position(&self) -> Option<f64> {
        self.last().map(|point| point.position)
    }

    /// Returns the timestamps and positions as two parallel vectors.
    #[must_use]
    pub fn unzip(&self) -> (Vec<f64>, Vec<f64>) {
        self.points
            .iter()
            .map(|point| (point.time, point.position))
            .unzip()
    }
}

impl FromIterator<TrajectoryPoint> for Trajectory {
    fn from_iter<I: IntoIterator<Item = TrajectoryPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<TrajectoryPoint> for Trajectory {
    fn extend<I: IntoIterator<Item = TrajectoryPoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
