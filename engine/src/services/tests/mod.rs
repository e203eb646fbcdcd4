//! Service-specific tests
//!
//! Each service has its own test file with dedicated fixtures and helpers.

#[cfg(test)]
mod loader;

// Common test utilities for services
#[cfg(test)]
pub mod common {
    use std::time::Duration;
    use tokio::time::timeout;

    /// Standard timeout for async operations in tests
    pub const TEST_TIMEOUT: Duration = Duration::from_secs(2);

    /// Helper to run async operations with timeout
    pub async fn with_timeout<T, F>(future: F) -> Result<T, tokio::time::error::Elapsed>
    where
        F: std::future::Future<Output = T>,
    {
        timeout(TEST_TIMEOUT, future).await
    }

    /// A 128-field data line with the given state, name, population and crime rate
    pub fn data_line(state: &str, name: &str, population: &str, crime: &str) -> String {
        let mut fields = vec!["?".to_string(); 128];
        fields[0] = state.to_string();
        fields[3] = name.to_string();
        fields[5] = population.to_string();
        fields[127] = crime.to_string();
        fields.join(",")
    }
}
