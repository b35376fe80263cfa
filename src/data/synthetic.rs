use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use super::model::{AttributeValue, PointRecord, PointTable};

pub const DEFAULT_POINT_COUNT: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Name of the generated value column.
pub const VALUE_COLUMN: &str = "z";

/// Partially random geostatistical data on the unit square.
///
/// `x` and `y` are uniform on `[0, 1)` and `z = 2x + y + noise` with
/// `noise ~ N(0, 1)`. All x are drawn first, then all y, then all noise.
pub fn generate_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointTable {
    let xs: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let ys: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let noise: Vec<f64> = (0..n).map(|_| StandardNormal.sample(rng)).collect();

    let records = xs
        .iter()
        .zip(&ys)
        .zip(&noise)
        .map(|((&x, &y), &e)| {
            PointRecord::new(x, y).with(VALUE_COLUMN, AttributeValue::Float(2.0 * x + y + e))
        })
        .collect();

    PointTable::new(vec![VALUE_COLUMN.to_string()], records)
}

/// [`generate_points`] with a freshly seeded generator.
pub fn generate_seeded(n: usize, seed: u64) -> PointTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_points(n, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_inside_unit_square() {
        let table = generate_seeded(DEFAULT_POINT_COUNT, DEFAULT_SEED);
        assert_eq!(table.len(), DEFAULT_POINT_COUNT);
        for rec in &table.records {
            assert!((0.0..1.0).contains(&rec.x));
            assert!((0.0..1.0).contains(&rec.y));
        }
    }

    #[test]
    fn values_are_finite() {
        let table = generate_seeded(500, 7);
        let values = table.column_values(VALUE_COLUMN).unwrap();
        assert!(values.iter().all(|v| v.is_some_and(f64::is_finite)));
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(generate_seeded(100, 42), generate_seeded(100, 42));
        assert_ne!(generate_seeded(100, 42), generate_seeded(100, 43));
    }

    #[test]
    fn first_x_is_first_uniform_draw() {
        let table = generate_seeded(100, 42);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let expected: f64 = rng.gen();
        assert_eq!(table.records[0].x, expected);
    }

    #[test]
    fn zero_points_is_empty() {
        assert!(generate_seeded(0, DEFAULT_SEED).is_empty());
    }

    #[test]
    fn noise_averages_out_to_the_trend() {
        let table = generate_seeded(10_000, 1);
        let mean_residual: f64 = table
            .records
            .iter()
            .map(|r| r.get(VALUE_COLUMN).and_then(|v| v.as_f64()).unwrap() - (2.0 * r.x + r.y))
            .sum::<f64>()
            / table.len() as f64;
        assert!(mean_residual.abs() < 0.05, "mean residual {mean_residual}");
    }
}
