//! Statistical primitives shared by the analyzers.

mod descriptive;
mod normality;

pub use descriptive::{IqrBounds, Summary, mean, pearson, quantile, round_to, sample_std, sorted};
pub use normality::{NormalityError, ShapiroWilk};
