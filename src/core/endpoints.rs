//! # Endpoint rotation.
//!
//! [`Endpoints`] hands out broker URLs round-robin. One cursor is shared by
//! every reconnect attempt, so successive attempts spread evenly over the
//! cluster whether the previous dial failed or a session ended.
//!
//! Owned by the reconnect loop alone; it takes `&mut self` and needs no lock.

use crate::error::RuntimeError;

/// Ordered, non-empty list of broker URLs with a rotating cursor.
#[derive(Debug, Clone)]
pub struct Endpoints {
    urls: Vec<String>,
    index: usize,
}

impl Endpoints {
    /// Creates a rotation starting at the first URL.
    pub fn new(urls: Vec<String>) -> Result<Self, RuntimeError> {
        if urls.is_empty() {
            return Err(RuntimeError::NoEndpoints);
        }
        Ok(Self { urls, index: 0 })
    }

    /// Returns the URL at the cursor and advances the cursor, wrapping around.
    pub fn next_url(&mut self) -> &str {
        let i = self.index;
        self.index = (self.index + 1) % self.urls.len();
        &self.urls[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_list() {
        assert_eq!(Endpoints::new(Vec::new()).unwrap_err(), RuntimeError::NoEndpoints);
    }

    #[test]
    fn visits_each_endpoint_once_per_cycle_in_order() {
        let urls: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut eps = Endpoints::new(urls.clone()).unwrap();

        for _cycle in 0..3 {
            let seen: Vec<String> = (0..urls.len()).map(|_| eps.next_url().to_string()).collect();
            assert_eq!(seen, urls);
        }
    }

    #[test]
    fn single_endpoint_repeats() {
        let mut eps = Endpoints::new(vec!["only".to_string()]).unwrap();
        assert_eq!(eps.next_url(), "only");
        assert_eq!(eps.next_url(), "only");
    }
}
