//! Chart kinds and the series each kind is drawn from.
//!
//! Everything here is pure: the terminal renderer in [`crate::ui`] only lays
//! out what these functions compute.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{HISTOGRAM_BINS, KDE_POINTS};
use crate::error::PipelineError;

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartKind {
    Line,
    Bar,
    HorizontalBar,
    Kde,
    Density,
    Area,
    Histogram,
    Box,
    Pie,
    Scatter,
    Hexbin,
}

impl ChartKind {
    pub const ALL: [ChartKind; 11] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::HorizontalBar,
        ChartKind::Kde,
        ChartKind::Density,
        ChartKind::Area,
        ChartKind::Histogram,
        ChartKind::Box,
        ChartKind::Pie,
        ChartKind::Scatter,
        ChartKind::Hexbin,
    ];

    /// Canonical short name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::HorizontalBar => "barh",
            ChartKind::Kde => "kde",
            ChartKind::Density => "density",
            ChartKind::Area => "area",
            ChartKind::Histogram => "hist",
            ChartKind::Box => "box",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Hexbin => "hexbin",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "line" => ChartKind::Line,
            "bar" => ChartKind::Bar,
            "barh" | "horizontal-bar" => ChartKind::HorizontalBar,
            "kde" => ChartKind::Kde,
            "density" => ChartKind::Density,
            "area" => ChartKind::Area,
            "hist" | "histogram" => ChartKind::Histogram,
            "box" => ChartKind::Box,
            "pie" => ChartKind::Pie,
            "scatter" => ChartKind::Scatter,
            "hexbin" => ChartKind::Hexbin,
            other => return Err(PipelineError::InvalidKind(other.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ChartKind {
    type Error = PipelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChartKind> for String {
    fn from(kind: ChartKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Frequency of each distinct value of one column
///
/// Entries are sorted by count, highest first; equal counts keep the order in
/// which the values first appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    pub category: String,
    pub entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    fn counts_f64(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, count)| *count as f64).collect()
    }
}

/// `(position, count)` points for line, area and scatter charts
pub fn series(counts: &ValueCounts) -> Vec<(f64, f64)> {
    counts
        .entries
        .iter()
        .enumerate()
        .map(|(idx, (_, count))| (idx as f64, *count as f64))
        .collect()
}

/// One bin of a histogram over the count values
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of the count values
///
/// When every count is the same the bins span `value - 0.5 ..= value + 0.5`.
/// The last bin is closed on the right.
pub fn histogram(counts: &ValueCounts) -> Vec<HistogramBin> {
    let values = counts.counts_f64();
    let Some((min, max)) = min_max(&values) else {
        return Vec::new();
    };
    let (min, max) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (max - min) / HISTOGRAM_BINS as f64;

    let mut bins: Vec<HistogramBin> = (0..HISTOGRAM_BINS)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for value in values {
        let idx = (((value - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Gaussian kernel density estimate of the count values
///
/// Uses Scott's rule for the bandwidth and evaluates the density on an evenly
/// spaced grid spanning half the data range beyond each extreme. A bandwidth
/// of 1 is used when the counts have no spread.
pub fn kde(counts: &ValueCounts) -> Vec<(f64, f64)> {
    let values = counts.counts_f64();
    let Some((min, max)) = min_max(&values) else {
        return Vec::new();
    };

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = if values.len() > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    let std_dev = variance.sqrt();
    let bandwidth = if std_dev > 0.0 { std_dev * n.powf(-0.2) } else { 1.0 };

    let range = if max > min { max - min } else { 2.0 * bandwidth };
    let start = min - range / 2.0;
    let end = max + range / 2.0;
    let step = (end - start) / (KDE_POINTS - 1) as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    (0..KDE_POINTS)
        .map(|i| {
            let x = start + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum();
            (x, density * norm)
        })
        .collect()
}

/// Minimum, lower quartile, median, upper quartile and maximum of the counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary using linear interpolation between order statistics
pub fn five_number_summary(counts: &ValueCounts) -> Option<FiveNumberSummary> {
    let mut values = counts.counts_f64();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    Some(FiveNumberSummary {
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
    })
}

/// Share of the total for each entry, in entry order
pub fn pie_shares(counts: &ValueCounts) -> Vec<(String, f64)> {
    let total = counts.total();
    if total == 0 {
        return Vec::new();
    }
    counts
        .entries
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64 / total as f64))
        .collect()
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, usize)]) -> ValueCounts {
        ValueCounts {
            category: "weekday".to_string(),
            entries: entries.iter().map(|(l, c)| (l.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn test_chart_kind_names() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
        }
        assert_eq!("horizontal-bar".parse::<ChartKind>().unwrap(), ChartKind::HorizontalBar);
        assert_eq!("histogram".parse::<ChartKind>().unwrap(), ChartKind::Histogram);
    }

    #[test]
    fn test_chart_kind_rejects_unknown() {
        match "triangle".parse::<ChartKind>() {
            Err(PipelineError::InvalidKind(kind)) => assert_eq!(kind, "triangle"),
            other => panic!("expected invalid kind, got {:?}", other),
        }
    }

    #[test]
    fn test_series_positions() {
        let c = counts(&[("1", 5), ("2", 3)]);
        assert_eq!(series(&c), vec![(0.0, 5.0), (1.0, 3.0)]);
    }

    #[test]
    fn test_histogram_bins_cover_all_values() {
        let c = counts(&[("a", 1), ("b", 2), ("c", 10), ("d", 10)]);
        let bins = histogram(&c);
        assert_eq!(bins.len(), HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[HISTOGRAM_BINS - 1].count, 2);
        assert_eq!(bins[0].lower, 1.0);
        assert!((bins[HISTOGRAM_BINS - 1].upper - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_constant_counts() {
        let c = counts(&[("a", 3), ("b", 3)]);
        let bins = histogram(&c);
        assert_eq!(bins[0].lower, 2.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_kde_integrates_to_about_one() {
        let c = counts(&[("a", 2), ("b", 4), ("c", 4), ("d", 9)]);
        let curve = kde(&c);
        assert_eq!(curve.len(), KDE_POINTS);
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, y)| y * step).sum();
        assert!(area > 0.8 && area < 1.05, "area was {}", area);
    }

    #[test]
    fn test_kde_empty() {
        assert!(kde(&counts(&[])).is_empty());
    }

    #[test]
    fn test_five_number_summary() {
        let c = counts(&[("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)]);
        let summary = five_number_summary(&c).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 5.0);
        assert!(five_number_summary(&counts(&[])).is_none());
    }

    #[test]
    fn test_pie_shares() {
        let shares = pie_shares(&counts(&[("1", 3), ("2", 1)]));
        assert_eq!(shares, vec![("1".to_string(), 0.75), ("2".to_string(), 0.25)]);
    }
}
