//! Statement submission and partition fetching, built on the
//! [`RequestExecutor`] port.

use std::sync::Arc;

use coldline_domain::wire::{wire_cell_as_str, WirePartitionResponse, WireStatementResponse};
use coldline_domain::{ClientError, Result, Row, RowSchema};
use tokio::sync::Semaphore;
use tracing::debug;
use uuid::Uuid;

use crate::ports::{HttpMethod, RequestExecutor};

/// Everything known about a query immediately after submission: the
/// statement handle (needed to fetch later partitions), the result schema,
/// the total partition count, and partition 0's already-decoded rows.
pub struct SubmissionOutcome {
    pub handle: String,
    pub schema: Arc<RowSchema>,
    pub partition_count: usize,
    pub first_partition_rows: Vec<Row>,
}

/// `POST /api/v2/statements?requestId=<uuid>` with `{"statement", "warehouse"}`.
pub async fn submit_statement(executor: &dyn RequestExecutor, sql: &str, warehouse: &str) -> Result<SubmissionOutcome> {
    let path = format!("/api/v2/statements?requestId={}", Uuid::new_v4());
    let body = serde_json::json!({ "statement": sql, "warehouse": warehouse }).to_string();

    let response = executor.execute(HttpMethod::Post, &path, Some(body)).await?;
    let parsed: WireStatementResponse =
        serde_json::from_str(&response.body).map_err(|e| ClientError::BadResponse { status: 200, body: e.to_string() })?;

    let schema = Arc::new(
        parsed.result_set_meta_data.as_ref().map(|m| m.to_schema()).unwrap_or_else(RowSchema::empty),
    );
    let partition_count = parsed
        .result_set_meta_data
        .as_ref()
        .map(|m| m.partition_info.len().max(1))
        .unwrap_or(0);

    let first_partition_rows = decode_rows(&schema, &parsed.data);

    Ok(SubmissionOutcome { handle: parsed.statement_handle, schema, partition_count, first_partition_rows })
}

/// `GET /api/v2/statements/<handle>?partition=<index>&requestId=<uuid>`.
pub async fn fetch_partition(
    executor: &dyn RequestExecutor,
    handle: &str,
    index: usize,
    schema: &Arc<RowSchema>,
) -> Result<Vec<Row>> {
    let path = format!("/api/v2/statements/{handle}?partition={index}&requestId={}", Uuid::new_v4());
    let response = executor.execute(HttpMethod::Get, &path, None).await?;
    let parsed: WirePartitionResponse =
        serde_json::from_str(&response.body).map_err(|e| ClientError::BadResponse { status: 200, body: e.to_string() })?;
    Ok(decode_rows(schema, &parsed.data))
}

fn decode_rows(schema: &Arc<RowSchema>, raw_rows: &[Vec<serde_json::Value>]) -> Vec<Row> {
    raw_rows
        .iter()
        .map(|raw_row| {
            let cells = schema
                .row_types()
                .iter()
                .zip(raw_row.iter())
                .map(|(row_type, cell)| coldline_domain::decode::decode_cell(row_type, wire_cell_as_str(cell)))
                .collect();
            Row::new(schema.clone(), cells)
        })
        .collect()
}

/// Fetch partitions `1..partition_count` sequentially, on the calling task.
pub async fn fetch_remaining_sequential(
    executor: &dyn RequestExecutor,
    handle: &str,
    schema: &Arc<RowSchema>,
    partition_count: usize,
) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for index in 1..partition_count {
        rows.extend(fetch_partition(executor, handle, index, schema).await?);
    }
    Ok(rows)
}

/// Fetch partitions `1..partition_count` across up to `workers` concurrent
/// tasks, reassembling rows in partition order regardless of completion
/// order. The first terminal error wins; tasks already dispatched are left
/// to finish on their own rather than forcibly aborted.
pub async fn fetch_remaining_threaded(
    executor: Arc<dyn RequestExecutor>,
    handle: Arc<str>,
    schema: Arc<RowSchema>,
    partition_count: usize,
    workers: usize,
) -> Result<Vec<Row>> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));
    let mut tasks = Vec::with_capacity(partition_count.saturating_sub(1));

    for index in 1..partition_count {
        let executor = executor.clone();
        let handle = handle.clone();
        let schema = schema.clone();
        let semaphore = semaphore.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| ClientError::Request(format!("partition worker semaphore closed: {e}")))?;
            debug!(partition = index, "fetching partition");
            fetch_partition(executor.as_ref(), &handle, index, &schema).await
        }));
    }

    let mut rows = Vec::new();
    for task in tasks {
        let partition_rows =
            task.await.map_err(|e| ClientError::Request(format!("partition fetch task panicked: {e}")))??;
        rows.extend(partition_rows);
    }
    Ok(rows)
}
