use std::ops::{Add, Div};

use average::{Mean, Variance};
use itertools::Itertools;

impl<T> Aggregate for T where T: ?Sized {}

pub trait Aggregate {
    #[must_use]
    fn mean<V>(self) -> Option<V>
    where
        Self: Sized + IntoIterator<Item = V>,
        V: Into<f64> + From<f64>,
    {
        let estimate: Mean = self.into_iter().map(Into::<f64>::into).collect();
        if estimate.is_empty() { None } else { Some(V::from(Mean::mean(&estimate))) }
    }

    #[must_use]
    fn median<V>(self) -> Option<V>
    where
        Self: Sized + IntoIterator<Item = V>,
        V: Copy + Add<Output = V> + Div<f64, Output = V> + Ord,
    {
        let mut values = self.into_iter().collect_vec();
        if values.is_empty() {
            return None;
        }
        values.sort_unstable();
        let index = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[index])
        } else {
            Some((values[index - 1] + values[index]) / 2.0)
        }
    }

    /// Standard deviation with Bessel's correction, undefined for less than two values.
    #[must_use]
    fn sample_standard_deviation<V>(self) -> Option<V>
    where
        Self: Sized + IntoIterator<Item = V>,
        V: Into<f64> + From<f64>,
    {
        let estimate: Variance = self.into_iter().map(Into::<f64>::into).collect();
        if estimate.len() < 2 {
            None
        } else {
            Some(V::from(estimate.sample_variance().sqrt()))
        }
    }

    /// Mean of the last `window` values in iteration order.
    #[must_use]
    fn trailing_mean<V>(self, window: usize) -> Option<V>
    where
        Self: Sized + IntoIterator<Item = V>,
        V: Into<f64> + From<f64>,
    {
        let values = self.into_iter().collect_vec();
        if window == 0 || values.len() < window {
            return None;
        }
        let skipped = values.len() - window;
        values.into_iter().skip(skipped).mean()
    }
}
