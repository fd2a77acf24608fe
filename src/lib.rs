pub mod core;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;
pub mod parallel;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::search_server::SearchServer;
pub use crate::core::types::{DocId, DocumentStatus, Execution};
pub use crate::search::predicate::DocumentPredicate;
pub use crate::search::results::ScoredDocument;

/*
┌──────────────────────────────────── TFIDX ARCHITECTURE ─────────────────────────────────────┐
│                                                                                              │
│  struct SearchServer                                                                         │
│  ┌──────────────────────────────────────────────────────────────────────────────────────┐   │
│  │ config: Config              // result cap, tie epsilon, shard count, workers          │   │
│  │ parser: QueryParser         // owns the StopWordFilter                                │   │
│  │ index: InvertedIndex        // single writer, many readers                            │   │
│  │ pool: rayon::ThreadPool     // private pool for Execution::Parallel                   │   │
│  └──────────────────────────────────────────────────────────────────────────────────────┘   │
│                                                                                              │
│  struct InvertedIndex                                                                        │
│  • word_to_docs: BTreeMap<Arc<str>, PostingList>      // owns canonical words                │
│  • doc_to_words: BTreeMap<DocId, BTreeMap<Arc<str>, f64>>  // clones of the same Arc         │
│  • documents:    BTreeMap<DocId, DocumentMeta>                                               │
│  • doc_order:    Vec<DocId>                           // insertion order                     │
│                                                                                              │
├──────────────────────────────────── RELATIONSHIPS ──────────────────────────────────────────┤
│                                                                                              │
│  add_document ──split_into_words──> StopWordFilter ──> InvertedIndex::add_document          │
│                                                                                              │
│  find_top_documents ──> QueryParser::parse ──> QueryExecutor ──scores_with──> TfIdfScorer    │
│                                                     │                                        │
│                                                     ├──sequential──> BTreeMap<DocId, f64>    │
│                                                     └──parallel────> ConcurrentMap (shards)  │
│                                                                  ──> TopKCollector           │
│                                                                                              │
│  match_document ──> DocumentMatcher ──> QueryParser::parse / parse_unordered                 │
│                                                                                              │
│  remove_document ──> InvertedIndex::remove_document / remove_document_parallel               │
│                                                                                              │
│  RequestQueue, process_queries, paginate ──wrap──> SearchServer / result slices              │
│                                                                                              │
└──────────────────────────────────────────────────────────────────────────────────────────────┘
*/
