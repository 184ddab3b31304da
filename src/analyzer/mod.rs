// Analyzer module: turns price records into a market trend.

pub mod trend;

pub use trend::classify_outcome;
