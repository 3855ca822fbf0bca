//! Descriptive statistics over plain `f64` slices.

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub(crate) fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub(crate) fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_dev_of_known_set() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values).unwrap();
        assert_eq!(m, 5.0);
        assert_eq!(population_std_dev(&values, m), 2.0);
        assert_eq!(min_max(&values), Some((2.0, 9.0)));
    }

    #[test]
    fn empty_input() {
        assert_eq!(mean(&[]), None);
        assert_eq!(min_max(&[]), None);
    }
}
