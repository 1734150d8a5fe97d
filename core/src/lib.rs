pub mod aggregator;
pub mod batch;
pub mod dedup;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod ranking;
pub mod stop_words;
pub mod throttle;
pub mod tokenizer;

pub use aggregator::{ShardedAggregator, DEFAULT_SHARD_COUNT};
pub use batch::{process_queries, process_queries_joined};
pub use dedup::remove_duplicates;
pub use document::{DocId, Document, DocumentFilter, DocumentStatus, ExecutionMode, MatchResult};
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use index::{InvertedIndex, TermId};
pub use ranking::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_PRECISION};
pub use stop_words::StopWordSet;
pub use throttle::{RequestQueue, MAX_WINDOW};
