//! Analysis engine for deciding the bump kind from messages

pub mod classifier;

pub use classifier::{Classification, Classifier, SkipReason};
