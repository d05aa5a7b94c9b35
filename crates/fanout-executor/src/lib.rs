use anyhow::anyhow;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

use fanout_core::{
    Aggregate, Error, FetchConfig, FetchTask, RecordSource, Result, ResultSet, RowSource,
    TabularResult, TaskGroup, TaskKind, DEFAULT_MAX_WORKERS,
};
use fanout_db::Database;
use fanout_http::ApiClient;
use fanout_tabular::load_csv;

/// Fans fetch tasks out over a bounded worker pool and collects the results
/// into one [`Aggregate`].
pub struct FetchAggregator {
    max_workers: usize,
}

impl FetchAggregator {
    pub fn new() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Task descriptors in submission order: files, then the API, then the database
    pub fn plan(
        files: &[PathBuf],
        records: &dyn RecordSource,
        rows: &dyn RowSource,
    ) -> Vec<FetchTask> {
        files
            .iter()
            .map(|path| FetchTask::file_read(path.display().to_string()))
            .chain([
                FetchTask::http_fetch(records.describe()),
                FetchTask::db_query(rows.describe()),
            ])
            .collect()
    }

    /// Run every fetch and assemble the results.
    ///
    /// Fails with the first error observed; the remaining tasks are
    /// cancelled and no partial aggregate is produced.
    pub async fn aggregate(
        &self,
        files: &[PathBuf],
        records: Arc<dyn RecordSource>,
        rows: Arc<dyn RowSource>,
    ) -> Result<Aggregate> {
        let plan = Self::plan(files, records.as_ref(), rows.as_ref());
        tracing::info!(
            "Submitting {} tasks to a pool of {} workers",
            plan.len(),
            self.max_workers
        );

        let mut group = TaskGroup::new(self.max_workers);

        for (task, path) in plan.iter().zip(files) {
            let path = path.clone();
            group.spawn(
                async move {
                    let table = load_csv(&path).await?;
                    Ok::<ResultSet, Error>(ResultSet::Table(table))
                }
                .instrument(task_span(task)),
            );
        }

        let api_task = &plan[files.len()];
        let source = records.clone();
        group.spawn(
            async move {
                let fetched = source.fetch_records().await?;
                Ok::<ResultSet, Error>(ResultSet::Records(fetched))
            }
            .instrument(task_span(api_task)),
        );

        let db_task = &plan[files.len() + 1];
        let source = rows.clone();
        group.spawn(
            async move {
                let fetched = source.fetch_rows().await?;
                Ok::<ResultSet, Error>(ResultSet::Rows(fetched))
            }
            .instrument(task_span(db_task)),
        );

        let results = group.join_all().await?;
        let aggregate = assemble(files, results)?;

        tracing::info!(
            tables = aggregate.tabular_results().len(),
            api_records = aggregate.api_result().len(),
            db_rows = aggregate.db_result().len(),
            "All data loaded"
        );

        Ok(aggregate)
    }
}

impl Default for FetchAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate the sources named by `config` using the HTTP and PostgreSQL
/// clients.
pub async fn run(config: &FetchConfig) -> Result<Aggregate> {
    tracing::debug!("Running aggregation with {:?}", config);

    let records: Arc<dyn RecordSource> = Arc::new(ApiClient::new(config.api_url.clone()));
    let rows: Arc<dyn RowSource> = Arc::new(Database::new(
        config.database_url.clone(),
        config.query.clone(),
    ));

    FetchAggregator::new()
        .aggregate(&config.files, records, rows)
        .await
}

fn task_span(task: &FetchTask) -> tracing::Span {
    tracing::info_span!("fetch", kind = %task.kind, source = %task.source)
}

// Results arrive in submission order, so each slot's kind is known up front.
fn assemble(files: &[PathBuf], results: Vec<ResultSet>) -> Result<Aggregate> {
    let mut results = results.into_iter();

    let tabular_results = files
        .iter()
        .map(|path| {
            let table = results
                .next()
                .and_then(ResultSet::into_table)
                .ok_or_else(|| slot_mismatch(TaskKind::FileRead))?;
            Ok(TabularResult {
                path: path.clone(),
                table,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let api_result = results
        .next()
        .and_then(ResultSet::into_records)
        .ok_or_else(|| slot_mismatch(TaskKind::HttpFetch))?;

    let db_result = results
        .next()
        .and_then(ResultSet::into_rows)
        .ok_or_else(|| slot_mismatch(TaskKind::DbQuery))?;

    Ok(Aggregate::new(tabular_results, api_result, db_result))
}

fn slot_mismatch(expected: TaskKind) -> Error {
    Error::Other(anyhow!("missing or mismatched {} result", expected))
}
