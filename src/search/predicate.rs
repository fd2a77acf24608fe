use crate::core::types::{DocId, DocumentStatus};

/// Caller-supplied document filter applied while accumulating relevance.
pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

/// A bare status keeps documents with exactly that status.
impl DocumentPredicate for DocumentStatus {
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        status == *self
    }
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}
