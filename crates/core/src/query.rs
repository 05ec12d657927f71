//! Top-level orchestration: submit a statement, pick a strategy, assemble a
//! [`QueryResult`].

use std::sync::Arc;

use coldline_domain::Result;

use crate::fetch::{fetch_remaining_sequential, fetch_remaining_threaded, submit_statement};
use crate::orchestrator::{compute_workers, select_strategy, Strategy};
use crate::ports::RequestExecutor;
use crate::result::{MaterializedResult, QueryResult, StreamingResult};

/// Run `sql` against `warehouse` through `executor`, returning a
/// materialized or streaming [`QueryResult`].
pub async fn run_query(
    executor: Arc<dyn RequestExecutor>,
    sql: &str,
    warehouse: &str,
    streaming: bool,
    scale_factor: usize,
    max_threads_per_query: usize,
) -> Result<QueryResult> {
    let outcome = submit_statement(executor.as_ref(), sql, warehouse).await?;
    let workers = compute_workers(outcome.partition_count, scale_factor, max_threads_per_query);
    let handle: Arc<str> = Arc::from(outcome.handle.as_str());

    match select_strategy(streaming, workers) {
        Strategy::Streaming => Ok(QueryResult::Streaming(StreamingResult::new(
            executor,
            handle,
            outcome.schema,
            outcome.partition_count,
            outcome.first_partition_rows,
        ))),
        Strategy::SingleThreaded => {
            let mut rows = outcome.first_partition_rows;
            rows.extend(
                fetch_remaining_sequential(executor.as_ref(), &handle, &outcome.schema, outcome.partition_count).await?,
            );
            Ok(QueryResult::Materialized(MaterializedResult::new(outcome.schema, rows)))
        }
        Strategy::Threaded { workers } => {
            let mut rows = outcome.first_partition_rows;
            rows.extend(
                fetch_remaining_threaded(executor, handle, outcome.schema.clone(), outcome.partition_count, workers)
                    .await?,
            );
            Ok(QueryResult::Materialized(MaterializedResult::new(outcome.schema, rows)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{HttpMethod, RawResponse};
    use async_trait::async_trait;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TenPartitionExecutor {
        partition_gets: AtomicUsize,
    }

    #[async_trait]
    impl RequestExecutor for TenPartitionExecutor {
        async fn execute(&self, _method: HttpMethod, path: &str, _body: Option<String>) -> Result<RawResponse> {
            if path.starts_with("/api/v2/statements?") {
                Ok(RawResponse {
                    body: serde_json::json!({
                        "statementHandle": "h1",
                        "resultSetMetaData": {
                            "numRows": 10,
                            "partitionInfo": (0..10).map(|_| serde_json::json!({"rowCount": 1})).collect::<Vec<_>>(),
                            "rowType": [{"name": "c1", "type": "fixed", "scale": 0}],
                        },
                        "data": [["0"]],
                    })
                    .to_string(),
                })
            } else {
                self.partition_gets.fetch_add(1, Ordering::SeqCst);
                Ok(RawResponse { body: serde_json::json!({ "data": [["1"]] }).to_string() })
            }
        }
    }

    #[tokio::test]
    async fn ten_partitions_assemble_to_ten_rows_threaded() {
        let concrete = Arc::new(TenPartitionExecutor { partition_gets: AtomicUsize::new(0) });
        let executor: Arc<dyn RequestExecutor> = concrete.clone();
        let result = run_query(executor, "select 1", "wh", false, 4, 8).await.unwrap();
        match result {
            QueryResult::Materialized(materialized) => assert_eq!(materialized.len(), 10),
            QueryResult::Streaming(_) => panic!("expected materialized result"),
        }
        assert_eq!(concrete.partition_gets.load(Ordering::SeqCst), 9);
    }

    #[tokio::test]
    async fn streaming_yields_all_rows_lazily() {
        let concrete = Arc::new(TenPartitionExecutor { partition_gets: AtomicUsize::new(0) });
        let executor: Arc<dyn RequestExecutor> = concrete.clone();
        let result = run_query(executor, "select 1", "wh", true, 4, 8).await.unwrap();
        let QueryResult::Streaming(mut stream) = result else { panic!("expected streaming result") };

        // Partition 0 is buffered; draining the stream triggers GETs for 1..9.
        let mut count = 0;
        while let Some(row) = stream.next().await {
            row.unwrap();
            count += 1;
        }
        assert_eq!(count, 10);
        assert_eq!(concrete.partition_gets.load(Ordering::SeqCst), 9);
    }
}
