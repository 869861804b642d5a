//! Write a synthetic `dados.csv` with the same header as the Kaggle
//! breast cancer table, so the dashboard can run without the real file.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SampleRow {
    id: u64,
    diagnosis: &'static str,
    radius_mean: f64,
    perimeter_mean: f64,
    area_mean: f64,
    concavity_mean: f64,
    #[serde(rename = "concave points_mean")]
    concave_points_mean: f64,
    symmetry_mean: f64,
}

/// Per-diagnosis mean and standard deviation of each generated column.
struct Profile {
    code: &'static str,
    radius: (f64, f64),
    concavity: (f64, f64),
    concave_points: (f64, f64),
    symmetry: (f64, f64),
}

const BENIGN: Profile = Profile {
    code: "B",
    radius: (12.1, 1.8),
    concavity: (0.046, 0.043),
    concave_points: (0.026, 0.016),
    symmetry: (0.174, 0.025),
};

const MALIGNANT: Profile = Profile {
    code: "M",
    radius: (17.5, 3.2),
    concavity: (0.161, 0.075),
    concave_points: (0.088, 0.034),
    symmetry: (0.193, 0.028),
};

fn sample(rng: &mut Pcg64, (mean, sd): (f64, f64), floor: f64) -> Result<f64> {
    let normal = Normal::new(mean, sd).context("invalid normal distribution")?;
    Ok(normal.sample(rng).max(floor))
}

fn generate_row(rng: &mut Pcg64, id: u64, profile: &Profile) -> Result<SampleRow> {
    let radius = sample(rng, profile.radius, 6.0)?;
    // Perimeter and area follow the radius with a little shape noise.
    let perimeter = 2.0 * std::f64::consts::PI * radius * sample(rng, (1.05, 0.02), 0.9)?;
    let area = std::f64::consts::PI * radius * radius * sample(rng, (0.98, 0.04), 0.8)?;
    let concavity = sample(rng, profile.concavity, 0.0)?;
    let concave_points = sample(rng, profile.concave_points, 0.0)?.min(concavity);

    Ok(SampleRow {
        id,
        diagnosis: profile.code,
        radius_mean: round(radius, 2),
        perimeter_mean: round(perimeter, 2),
        area_mean: round(area, 1),
        concavity_mean: round(concavity, 5),
        concave_points_mean: round(concave_points, 5),
        symmetry_mean: round(sample(rng, profile.symmetry, 0.1)?, 4),
    })
}

fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn main() -> Result<()> {
    let rows = 569;
    let malignant_share = 212.0 / 569.0;
    let output_path = "dados.csv";

    let mut rng = Pcg64::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut id: u64 = 842_302;
    for _ in 0..rows {
        let profile = if rng.random_bool(malignant_share) {
            &MALIGNANT
        } else {
            &BENIGN
        };
        id += rng.random_range(1..5_000);
        writer.serialize(generate_row(&mut rng, id, profile)?)?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} tumor records to {output_path}");
    Ok(())
}
