pub mod aggregate;
pub mod analyzer;
pub mod period;
pub mod series;

pub use self::{
    analyzer::{AnalysisError, AnalysisResult, analyze},
    period::Period,
    series::{ConsumptionRecord, ConsumptionSeries},
};
