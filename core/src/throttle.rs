use crate::document::{Document, DocumentFilter, ExecutionMode};
use crate::engine::SearchEngine;
use crate::error::Result;
use std::collections::VecDeque;

/// Width of the trailing window, in requests.
pub const MAX_WINDOW: u64 = 1440;

#[derive(Debug, Clone, Copy)]
struct RequestRecord {
    result_count: usize,
    timestamp: u64,
}

/// Runs queries against an engine and counts how many of the requests inside
/// the trailing `MAX_WINDOW` ticks came back empty.
///
/// Each request advances a logical clock by one tick. Not thread-safe: wrap it
/// in a lock if several issuers share it.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<RequestRecord>,
    empty_requests: usize,
    current_time: u64,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self {
            engine,
            requests: VecDeque::new(),
            empty_requests: 0,
            current_time: 0,
        }
    }

    pub fn add_find_request<'f>(
        &mut self,
        raw_query: &str,
        filter: impl Into<DocumentFilter<'f>>,
    ) -> Result<Vec<Document>> {
        let documents = self
            .engine
            .find_top_documents(ExecutionMode::Sequential, raw_query, filter)?;
        self.record(documents.len());
        Ok(documents)
    }

    pub fn empty_result_count(&self) -> usize {
        self.empty_requests
    }

    fn record(&mut self, result_count: usize) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp <= MAX_WINDOW {
                break;
            }
            if oldest.result_count == 0 {
                self.empty_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(RequestRecord {
            result_count,
            timestamp: self.current_time,
        });
        if result_count == 0 {
            self.empty_requests += 1;
        }
        tracing::debug!(
            tick = self.current_time,
            result_count,
            empty_requests = self.empty_requests,
            "request recorded"
        );
    }
}
