pub mod executor;
pub mod predicate;
pub mod results;
pub mod paginator;
pub mod request_queue;
pub mod batch;
