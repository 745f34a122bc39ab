use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use hover_sim::StepRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in a terminal
    Table,
    Csv,
    Json,
}

/// One output row per simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Row {
    time: f64,
    position: f64,
    velocity: f64,
    acceleration: f64,
    thrust: f64,
    p: f64,
    i: f64,
    d: f64,
}

impl From<&StepRecord> for Row {
    fn from(record: &StepRecord) -> Self {
        Self {
            time: record.time,
            position: record.position,
            velocity: record.velocity,
            acceleration: record.acceleration,
            thrust: record.thrust,
            p: record.terms.proportional,
            i: record.terms.integral,
            d: record.terms.derivative,
        }
    }
}

/// Writes the step history in the requested format.
pub fn write<W: Write>(history: &[StepRecord], format: OutputFormat, mut writer: W) -> Result<()> {
    let rows = history.iter().map(Row::from);

    match format {
        OutputFormat::Table => {
            writeln!(
                writer,
                "{:>8} {:>10} {:>10} {:>10} {:>8} {:>10} {:>10} {:>10}",
                "time", "position", "velocity", "accel", "thrust", "p", "i", "d"
            )?;
            for row in rows {
                writeln!(
                    writer,
                    "{:>8.2} {:>10.4} {:>10.4} {:>10.4} {:>8.3} {:>10.4} {:>10.4} {:>10.4}",
                    row.time,
                    row.position,
                    row.velocity,
                    row.acceleration,
                    row.thrust,
                    row.p,
                    row.i,
                    row.d
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut writer);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            let rows: Vec<Row> = rows.collect();
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use hover_core::{Config, Params};
    use hover_sim::Simulation;

    fn history(steps: usize) -> Vec<StepRecord> {
        let params = Params {
            duration: 0.1 * steps as f64,
            ..Params::default()
        };
        Simulation::new(Config::new(params).unwrap())
            .steps()
            .collect()
    }

    fn render(format: OutputFormat, steps: usize) -> String {
        let mut buffer = Vec::new();
        write(&history(steps), format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn table_has_header_and_one_line_per_step() {
        let text = render(OutputFormat::Table, 3);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("position"));
        assert!(lines[1].trim_start().starts_with("0.10"));
    }

    #[test]
    fn csv_has_named_columns() {
        let text = render(OutputFormat::Csv, 2);
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("time,position,velocity,acceleration,thrust,p,i,d")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn json_is_an_array_of_rows() {
        let text = render(OutputFormat::Json, 4);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["thrust"], 15.0);
    }

    #[test]
    fn empty_history_writes_only_headers() {
        let text = render(OutputFormat::Table, 0);
        assert_eq!(text.lines().count(), 1);

        let text = render(OutputFormat::Json, 0);
        assert_eq!(text.trim(), "[]");
    }
}
