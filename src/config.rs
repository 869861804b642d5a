use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

pub const DATA_PATH_VAR: &str = "TUMOR_DASH_DATA";
pub const HISTOGRAM_BINS_VAR: &str = "TUMOR_DASH_BINS";
pub const PREVIEW_ROWS_VAR: &str = "TUMOR_DASH_PREVIEW_ROWS";

/// Upper limit for the histogram bin count; larger requests are clamped.
pub const MAX_HISTOGRAM_BINS: usize = 500;

/// Startup settings.  Defaults can be overridden through environment
/// variables; invalid values are logged and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Data file, relative to the working directory unless absolute.
    pub data_path: PathBuf,
    pub histogram_bins: usize,
    /// Rows shown in the "loaded data" preview table.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("dados.csv"),
            histogram_bins: 30,
            preview_rows: 5,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(bins) = positive(&lookup, HISTOGRAM_BINS_VAR) {
            if bins > MAX_HISTOGRAM_BINS {
                log::warn!("{HISTOGRAM_BINS_VAR}={bins} is too large, using {MAX_HISTOGRAM_BINS}");
            }
            config.histogram_bins = bins.min(MAX_HISTOGRAM_BINS);
        }
        if let Some(rows) = positive(&lookup, PREVIEW_ROWS_VAR) {
            config.preview_rows = rows;
        }

        log::debug!("dashboard config: {config:?}");
        config
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            log::warn!("ignoring {key}={raw:?}: expected a positive integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(
            DashboardConfig::from_lookup(lookup(&[])),
            DashboardConfig::default()
        );
        assert_eq!(
            DashboardConfig::default().data_path,
            PathBuf::from("dados.csv")
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (DATA_PATH_VAR, "/data/wdbc.tsv"),
            (HISTOGRAM_BINS_VAR, "12"),
            (PREVIEW_ROWS_VAR, " 10 "),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/data/wdbc.tsv"));
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.preview_rows, 10);
    }

    #[test]
    fn huge_bin_count_is_capped() {
        let config =
            DashboardConfig::from_lookup(lookup(&[(HISTOGRAM_BINS_VAR, "1000000")]));
        assert_eq!(config.histogram_bins, MAX_HISTOGRAM_BINS);

        let config = DashboardConfig::from_lookup(lookup(&[(HISTOGRAM_BINS_VAR, "500")]));
        assert_eq!(config.histogram_bins, 500);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = DashboardConfig::from_lookup(lookup(&[
            (HISTOGRAM_BINS_VAR, "0"),
            (PREVIEW_ROWS_VAR, "many"),
        ]));
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.preview_rows, 5);
    }
}
