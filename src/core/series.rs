use std::ops::Deref;

use bon::Builder;
use serde::Serialize;

use crate::{core::period::Period, quantity::energy::KilowattHours};

/// Single month of consumption.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Builder, Serialize)]
pub struct ConsumptionRecord {
    pub period: Period,

    #[serde(rename = "consumption_kwh")]
    pub value: KilowattHours,
}

/// Records in the order they were entered, which is taken as chronological.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConsumptionSeries(Vec<ConsumptionRecord>);

impl ConsumptionSeries {
    pub fn values(&self) -> impl Iterator<Item = KilowattHours> + '_ {
        self.0.iter().map(|record| record.value)
    }
}

impl Deref for ConsumptionSeries {
    type Target = [ConsumptionRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<ConsumptionRecord> for ConsumptionSeries {
    fn from_iter<T: IntoIterator<Item = ConsumptionRecord>>(iterator: T) -> Self {
        Self(iterator.into_iter().collect())
    }
}
