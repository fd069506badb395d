//! Hand-off to external reporting: plot series, sinks and console diagnostics.
//!
//! Rendering is not done here. A [`ReportSink`] receives each [`PlotSeries`]
//! and decides what to do with it; [`CsvSink`] is the one shipped with the crate.

use std::fmt;
use std::io::{self, Write};

use crate::math::Scalar;

/// One labelled x/y series destined for a plot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// Output identifier (file stem for file-backed sinks).
    pub identifier: String,
    /// Plot title.
    pub title: String,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Abscissa values.
    pub x: Vec<Scalar>,
    /// Ordinate values, same length as `x`.
    pub y: Vec<Scalar>,
}

impl PlotSeries {
    /// Creates a series.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        x: Vec<Scalar>,
        y: Vec<Scalar>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            x,
            y,
        }
    }
}

/// Receiver for computed series.
pub trait ReportSink {
    /// Consumes one series.
    fn emit(&mut self, series: &PlotSeries) -> io::Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, series: &PlotSeries) -> io::Result<()> {
        (**self).emit(series)
    }
}

/// Collects series in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Series received so far.
    pub series: Vec<PlotSeries>,
}

impl ReportSink for MemorySink {
    fn emit(&mut self, series: &PlotSeries) -> io::Result<()> {
        self.series.push(series.clone());
        Ok(())
    }
}

/// Writes each series as a two-column CSV to the wrapped writer.
///
/// The header row carries the axis labels; a `# title` comment precedes it.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for CsvSink<W> {
    fn emit(&mut self, series: &PlotSeries) -> io::Result<()> {
        write_series_csv(&mut self.writer, series)
    }
}

/// Writes `series` as CSV.
pub fn write_series_csv<W: Write>(mut w: W, series: &PlotSeries) -> io::Result<()> {
    writeln!(w, "# {}", series.title)?;
    writeln!(w, "{},{}", series.x_label, series.y_label)?;
    for (x, y) in series.x.iter().zip(&series.y) {
        writeln!(w, "{:.16e},{:.16e}", x, y)?;
    }
    Ok(())
}

/// Scalar diagnostics reported for every run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    /// Turn-indexed inverse-diameter sum (1/m).
    pub inverse_sum: Scalar,
    /// Stack inductance (µH).
    pub inductance_uh: Scalar,
    /// Bank capacitance (µF).
    pub capacitance_uf: Scalar,
    /// Loop resistance including the switch (Ω).
    pub resistance_ohm: Scalar,
    /// Resistance of one winding (Ω).
    pub single_resistance_ohm: Scalar,
    /// Whole turns per winding.
    pub turns: usize,
    /// Trace length of one winding (mm).
    pub trace_length_mm: Scalar,
    /// Peak centre field (G).
    pub peak_field_gauss: Scalar,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "a_inv_sum = {}", self.inverse_sum)?;
        writeln!(f, "Inductance = {} uH", self.inductance_uh)?;
        writeln!(f, "Capacitance = {} uF", self.capacitance_uf)?;
        writeln!(f, "Resistance = {} Ohm", self.resistance_ohm)?;
        writeln!(f, "Resistance (single) = {} Ohm", self.single_resistance_ohm)?;
        writeln!(f, "Number of Turns (1 coil) = {}", self.turns)?;
        writeln!(f, "Trace Length (1 coil) = {} mm", self.trace_length_mm)?;
        write!(f, "Peak Magnetic Field = {} Gauss", self.peak_field_gauss)
    }
}
