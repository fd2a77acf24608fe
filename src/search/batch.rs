use rayon::prelude::*;
use tracing::debug;
use crate::core::error::Result;
use crate::core::search_server::SearchServer;
use crate::search::results::ScoredDocument;

/// Runs `find_top_documents` for every query on the server's worker pool.
/// Results keep the input order; any failing query fails the whole batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<ScoredDocument>>>
where
    S: AsRef<str> + Sync,
{
    debug!(queries = queries.len(), "processing query batch");
    server.install(|| {
        queries.par_iter()
            .map(|query| server.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// Same as [`process_queries`], flattened into one sequence.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<ScoredDocument>>
where
    S: AsRef<str> + Sync,
{
    let batches = process_queries(server, queries)?;
    Ok(batches.into_iter().flatten().collect())
}
