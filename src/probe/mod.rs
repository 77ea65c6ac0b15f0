pub mod driver;
pub mod report;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;
