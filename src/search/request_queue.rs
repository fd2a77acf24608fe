use std::collections::VecDeque;
use tracing::trace;
use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::core::types::{DocId, DocumentStatus};
use crate::search::results::ScoredDocument;

/// Sliding window of recent requests against one server, tracking how many
/// of them came back empty. Holds at most `Config::request_window` entries;
/// each request past that evicts the oldest one.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<bool>,  // true = request returned nothing
    capacity: usize,
    no_result_requests: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        let capacity = server.config().request_window;
        RequestQueue {
            server,
            requests: VecDeque::with_capacity(capacity),
            capacity,
            no_result_requests: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        let found = self.server.find_top_documents(raw_query)?;
        self.record(found.is_empty());
        Ok(found)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<ScoredDocument>> {
        let found = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(found.is_empty());
        Ok(found)
    }

    pub fn add_find_request_by<F>(&mut self, raw_query: &str, predicate: F) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let found = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(found.is_empty());
        Ok(found)
    }

    /// Empty results among the requests currently in the window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn record(&mut self, no_result: bool) {
        if self.capacity == 0 {
            return;
        }
        if self.requests.len() == self.capacity {
            if let Some(true) = self.requests.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        self.requests.push_back(no_result);
        if no_result {
            self.no_result_requests += 1;
        }
        trace!(window = self.requests.len(), no_result = self.no_result_requests, "recorded request");
    }
}
