use crate::errors::{GradeError, Result};

/// Minimum, quartiles and maximum of a grade sample.
///
/// Quartiles are estimated by linear interpolation between closest ranks:
/// for a fraction `f` of a sorted sample of length `n` the rank is
/// `f * (n - 1)` and the value is interpolated between the two neighbouring
/// elements. This matches numpy's default `percentile`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FiveNumberSummary {
    pub minimum: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub maximum: f64,
}

impl FiveNumberSummary {
    pub fn values(&self) -> [f64; 5] {
        [self.minimum, self.q1, self.median, self.q3, self.maximum]
    }
}

/// Computes the five-number summary of `grades`.
///
/// Errors carry an empty course code; [`crate::sample::Sample::summarize`]
/// fills it in.
pub fn summarize(grades: &[f64]) -> Result<FiveNumberSummary> {
    if let Some(&value) = grades.iter().find(|value| !value.is_finite()) {
        return Err(GradeError::NonFiniteGrade {
            code: String::new(),
            value,
        });
    }

    let mut sorted = grades.to_owned();
    sorted.sort_by(f64::total_cmp);

    let (Some(&minimum), Some(&maximum)) = (sorted.first(), sorted.last()) else {
        return Err(GradeError::EmptySample {
            code: String::new(),
        });
    };

    Ok(FiveNumberSummary {
        minimum,
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        maximum,
    })
}

// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], fraction: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&fraction));

    let max_index = sorted.len() - 1;
    let raw_index = fraction * (max_index as f64);
    let bottom_index = raw_index.floor() as usize;

    if bottom_index >= max_index {
        return sorted[max_index];
    }
    let bottom_element = sorted[bottom_index];
    let next_element = sorted[bottom_index + 1];
    let distance = raw_index.fract();

    bottom_element + (next_element - bottom_element) * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "{}: expected {}, got {}",
            what,
            expected,
            actual
        );
    }

    #[test]
    fn test_summaries_of_known_samples() {
        // (name, grades, [minimum, q1, median, q3, maximum])
        let test_cases: Vec<(&str, Vec<f64>, [f64; 5])> = vec![
            (
                "one to twelve",
                (1..=12).map(f64::from).collect(),
                [1.0, 3.75, 6.5, 9.25, 12.0],
            ),
            ("single", vec![0.42], [0.42, 0.42, 0.42, 0.42, 0.42]),
            ("pair", vec![2.0, 1.0], [1.0, 1.25, 1.5, 1.75, 2.0]),
            ("odd", vec![5.0, 1.0, 3.0], [1.0, 2.0, 3.0, 4.0, 5.0]),
            (
                "math 151",
                vec![0.95, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.96, 0.99, 1.05, 0.81],
                [0.81, 0.9825, 1.0, 1.0, 1.05],
            ),
        ];

        for (name, grades, expected) in test_cases {
            let summary = summarize(&grades).unwrap();
            for (i, what) in ["minimum", "q1", "median", "q3", "maximum"]
                .iter()
                .enumerate()
            {
                assert_close(
                    summary.values()[i],
                    expected[i],
                    &format!("{}: {}", name, what),
                );
            }
        }
    }

    #[test]
    fn test_constant_sample() {
        let summary = summarize(&[0.7; 9]).unwrap();
        assert_eq!(summary.values(), [0.7; 5]);
    }

    #[test]
    fn test_summary_is_ordered() {
        let samples: Vec<Vec<f64>> = vec![
            vec![3.0, -1.0, 2.5, 2.5, 100.0],
            vec![0.0, 0.0, 1.0],
            vec![-5.5, -7.25, -1.0, -3.0],
            (0..97).map(|i| ((i * 37) % 101) as f64 / 7.0).collect(),
        ];
        for grades in samples {
            let values = summarize(&grades).unwrap().values();
            for pair in values.windows(2) {
                assert!(pair[0] <= pair[1], "{:?} is not ordered", values);
            }
        }
    }

    #[test]
    fn test_order_invariance() {
        let grades = vec![0.5, 0.9, 0.1, 0.7, 0.3, 0.3, 1.0, 0.0];
        let mut reversed = grades.clone();
        reversed.reverse();
        let mut rotated = grades.clone();
        rotated.rotate_left(3);

        let expected = summarize(&grades).unwrap();
        assert_eq!(summarize(&reversed).unwrap(), expected);
        assert_eq!(summarize(&rotated).unwrap(), expected);
    }

    #[test]
    fn test_empty_sample_is_rejected() {
        assert!(matches!(
            summarize(&[]),
            Err(GradeError::EmptySample { .. })
        ));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                summarize(&[1.0, bad, 2.0]),
                Err(GradeError::NonFiniteGrade { .. })
            ));
        }
    }
}
