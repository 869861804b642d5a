use std::collections::BTreeMap;

use super::model::{Diagnosis, Measure, TumorRecord};

/// Equal-width bins over one measure, counted separately per diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub measure: Measure,
    pub start: f64,
    pub bin_width: f64,
    /// One count vector per diagnosis, each `bins` long.
    pub counts: BTreeMap<Diagnosis, Vec<usize>>,
}

impl Histogram {
    /// Bin `rows` on `measure`.  `None` when there is nothing to bin.
    ///
    /// The last bin is closed on the right so the maximum lands in it.
    pub fn build(rows: &[TumorRecord], measure: Measure, bins: usize) -> Option<Self> {
        let bins = bins.max(1);
        let (min, max) = rows.iter().map(|r| r.value(measure)).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (f64::min(lo, v), f64::max(hi, v)),
            })
        })?;

        let span = max - min;
        let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };

        let mut counts: BTreeMap<Diagnosis, Vec<usize>> =
            Diagnosis::ALL.iter().map(|&d| (d, vec![0; bins])).collect();
        for row in rows {
            let idx = (((row.value(measure) - min) / bin_width).floor() as usize).min(bins - 1);
            if let Some(bucket) = counts.get_mut(&row.diagnosis) {
                bucket[idx] += 1;
            }
        }

        Some(Self {
            measure,
            start: min,
            bin_width,
            counts,
        })
    }

    pub fn bin_count(&self) -> usize {
        self.counts.values().next().map_or(0, Vec::len)
    }

    pub fn bin_center(&self, idx: usize) -> f64 {
        self.start + (idx as f64 + 0.5) * self.bin_width
    }

    pub fn counts_for(&self, diagnosis: Diagnosis) -> &[usize] {
        self.counts.get(&diagnosis).map(Vec::as_slice).unwrap_or(&[])
    }
}
