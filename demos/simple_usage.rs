/// tfidx API demo
///
/// Demonstrates the main operations:
/// - Indexing documents with stop words, statuses and ratings
/// - Ranked search (status filter, custom predicate, parallel execution)
/// - Matching a query against one document
/// - Removal, pagination, request statistics and batch queries
///
/// Run with `RUST_LOG=tfidx=debug` to see the server's logs.

use tfidx::search::batch::process_queries;
use tfidx::search::paginator::paginate;
use tfidx::search::request_queue::RequestQueue;
use tfidx::{Config, DocId, DocumentStatus, Execution, SearchServer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== tfidx demo ===\n");

    // 1. Server with stop words and a config read from JSON
    let config = Config::from_json(r#"{ "max_result_count": 3, "worker_threads": 2 }"#)?;
    let mut server = SearchServer::with_config(["and", "with", "in", "the"], config)?;

    // 2. Index documents
    let documents = [
        (1, "funny pet and nasty rat", DocumentStatus::Actual, vec![7, 2, 7]),
        (2, "funny pet with curly hair", DocumentStatus::Actual, vec![1, 2, 3]),
        (3, "big cat nasty hair", DocumentStatus::Actual, vec![1, 2, 8]),
        (4, "big dog cat Vladislav", DocumentStatus::Banned, vec![1, 3, 2]),
        (5, "big dog hamster Borya", DocumentStatus::Actual, vec![1, 1, 1]),
        (6, "brown cat in the city", DocumentStatus::Irrelevant, vec![4, 5]),
    ];
    for (id, text, status, ratings) in &documents {
        server.add_document(DocId(*id), text, *status, ratings)?;
    }
    println!("✓ Indexed {} documents", server.document_count());

    // 3. Ranked search
    println!("\n--- find_top_documents(\"curly nasty cat\") ---");
    for doc in server.find_top_documents("curly nasty cat")? {
        println!("{}", doc);
    }

    println!("\n--- BANNED only ---");
    for doc in server.find_top_documents_by_status("curly nasty cat", DocumentStatus::Banned)? {
        println!("{}", doc);
    }

    println!("\n--- even ids, parallel ---");
    let even = |id: DocId, _: DocumentStatus, _: i32| id.value() % 2 == 0;
    for doc in server.find_top_documents_with(Execution::Parallel, "big cat -hamster", even)? {
        println!("{}", doc);
    }

    // 4. Matching
    let (words, status) = server.match_document("nasty hair -dog", DocId(3))?;
    println!("\n✓ Document 3 matches {:?} ({:?})", words, status);

    // 5. Removal
    server.remove_document_with(Execution::Parallel, DocId(4));
    println!("✓ Removed document 4, {} left", server.document_count());
    for id in &server {
        println!("  {} -> {} words", id, server.word_frequencies(id).len());
    }

    // 6. Pagination
    let results = server.find_top_documents("big funny cat")?;
    for page in paginate(&results, 2) {
        println!("\nPage: {}", page);
    }

    // 7. Request statistics
    let mut requests = RequestQueue::new(&server);
    for _ in 0..10 {
        requests.add_find_request("sparrow")?;
    }
    requests.add_find_request("curly dog")?;
    requests.add_find_request_by_status("big", DocumentStatus::Actual)?;
    println!("\n✓ {} of {} requests found nothing", requests.no_result_requests(), requests.len());

    // 8. Batch queries
    let queries = ["nasty rat -not", "funny pet", "curly hair"];
    for (query, found) in queries.iter().zip(process_queries(&server, &queries)?) {
        println!("{:?}: {} documents", query, found.len());
    }

    Ok(())
}
