use serde::{Serialize, Deserialize};
use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_result_count: usize,   // Cap applied by find_top_documents
    pub relevance_epsilon: f64,    // Relevances closer than this are ranked by rating
    pub shard_count: usize,        // Partitions of the parallel relevance accumulator
    pub worker_threads: usize,     // Size of the server's private rayon pool
    pub request_window: usize,     // Requests remembered by RequestQueue
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_result_count: 5,
            relevance_epsilon: 1e-6,
            shard_count: 150,
            worker_threads: num_cpus::get(),
            request_window: 1440,                  // One request per minute for a day
        }
    }
}

impl Config {
    /// Parses a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_result_count == 0 {
            return Err(Error::invalid_argument("max_result_count must be positive"));
        }
        if self.shard_count == 0 {
            return Err(Error::invalid_argument("shard_count must be positive"));
        }
        if self.worker_threads == 0 {
            return Err(Error::invalid_argument("worker_threads must be positive"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(Error::invalid_argument(format!(
                "relevance_epsilon {} must be a non-negative number",
                self.relevance_epsilon
            )));
        }
        Ok(())
    }
}
