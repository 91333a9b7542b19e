pub mod classifier;

#[cfg(test)]
mod classifier_tests;
