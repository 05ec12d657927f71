//! The query-result types consumers see: fully materialized or streaming.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use coldline_domain::{Result, Row, RowSchema};
use futures::Stream;

use crate::fetch;
use crate::ports::RequestExecutor;

/// A query's outcome, in whichever shape the caller asked for via
/// `query(.., streaming)`.
pub enum QueryResult {
    Materialized(MaterializedResult),
    Streaming(StreamingResult),
}

/// A fully materialized result set: every row already decoded and in
/// memory, in partition order.
#[derive(Debug, Clone)]
pub struct MaterializedResult {
    schema: Arc<RowSchema>,
    rows: Vec<Row>,
}

impl MaterializedResult {
    pub fn new(schema: Arc<RowSchema>, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema.names()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// A lazy result set: partition 0 is served from memory, every later
/// partition is fetched only once iteration reaches it (strict laziness —
/// only fetching as far as the caller actually drains).
pub struct StreamingResult {
    schema: Arc<RowSchema>,
    inner: Pin<Box<dyn Stream<Item = Result<Row>> + Send>>,
}

impl StreamingResult {
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        handle: Arc<str>,
        schema: Arc<RowSchema>,
        partition_count: usize,
        first_partition_rows: Vec<Row>,
    ) -> Self {
        let stream_schema = schema.clone();
        let inner = async_stream::try_stream! {
            for row in first_partition_rows {
                yield row;
            }
            for index in 1..partition_count {
                let rows = fetch::fetch_partition(executor.as_ref(), &handle, index, &stream_schema).await?;
                for row in rows {
                    yield row;
                }
            }
        };
        Self { schema, inner: Box::pin(inner) }
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }
}

impl Stream for StreamingResult {
    type Item = Result<Row>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
