pub mod batch;
pub mod fixture;
pub mod logging;
pub mod recurrence;
pub mod shared;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
