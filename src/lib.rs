pub mod commands;
pub mod domain;
pub mod logging;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
