//! Bell-curve sampling.

use rand::Rng;

/// Approximately normal sample around `mean`.
///
/// Sums 12 uniform draws and re-centres, giving a bell shape with unit
/// standard deviation, then scales by `sigma` and clamps to the optional
/// bounds. The tails cut off at six sigma, which is plenty for picking
/// levels and sizes.
pub fn bell_curve(
    rng: &mut impl Rng,
    mean: f64,
    sigma: f64,
    lo: Option<f64>,
    hi: Option<f64>,
) -> f64 {
    let z = (0..12).map(|_| rng.random::<f64>()).sum::<f64>() - 6.0;
    let mut val = mean + sigma * z;
    if let Some(lo) = lo {
        val = val.max(lo);
    }
    if let Some(hi) = hi {
        val = val.min(hi);
    }
    val
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn zero_sigma_is_exactly_the_mean() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(bell_curve(&mut rng, 10.0, 0.0, None, None), 10.0);
    }

    #[test]
    fn bounds_clamp_every_sample() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..2000 {
            let v = bell_curve(&mut rng, 10.0, 2.0, Some(5.0), Some(15.0));
            assert!((5.0..=15.0).contains(&v));
        }
    }

    #[test]
    fn samples_cluster_around_the_mean() {
        let mut rng = SmallRng::seed_from_u64(42);
        let n = 4000;
        let sum: f64 = (0..n).map(|_| bell_curve(&mut rng, 10.0, 2.0, None, None)).sum();
        let avg = sum / n as f64;
        assert!((avg - 10.0).abs() < 0.2, "avg {avg}");
    }
}
