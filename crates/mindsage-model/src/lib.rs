pub mod analysis;
pub mod journal;
pub mod mood;
