use itertools::Itertools;
use ncollide2d::na::RealField;

/// Finds the index of the last value in a sorted slice which is less than or equal to the test
/// value. Values below the second entry return 0 and values at or past the last entry return the
/// last index, so the result can always be used as the left end of an interval.
pub fn preceding_index_search<N: RealField + Copy>(slice: &[N], test_value: N) -> usize {
    if slice.len() <= 1 || slice[1] > test_value {
        return 0;
    }

    let mut a = 1;
    let mut b = slice.len() - 1;
    if slice[b] <= test_value {
        return b;
    }

    while b > a + 1 {
        let check = (a + b) / 2;
        if test_value >= slice[check] {
            a = check;
        } else {
            b = check;
        }
    }
    a
}

/// An interval index and the fraction of the way through that interval
#[derive(Debug, Copy, Clone)]
pub struct IndexAndFraction {
    pub i: usize,
    pub f: f64,
}

impl IndexAndFraction {
    pub fn new(i: usize, f: f64) -> Self {
        Self { i, f }
    }
}

/// Locates a value between the entries of a sorted slice with at least two entries. Values
/// outside the slice are clamped to the nearest end, so `f` is always within [0, 1].
pub fn bracket(slice: &[f64], value: f64) -> IndexAndFraction {
    let i = preceding_index_search(slice, value).min(slice.len() - 2);
    let width = slice[i + 1] - slice[i];
    let f = ((value - slice[i]) / width).clamp(0.0, 1.0);
    IndexAndFraction::new(i, f)
}

pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| b > a)
}

/// `n` evenly spaced values from `start` to `end`, both included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
