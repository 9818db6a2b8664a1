use std::sync::Arc;

use ai_file_common::FileManagerError;
use ai_file_domain::{AnalysisDecision, FileEntry};
use futures::{stream, StreamExt};
use tokio::sync::mpsc;

use crate::client::AnalysisProvider;

/// 进度回调：参数为完成批次的 1 起始序号。批次并行执行，回调到达顺序
/// 与派发顺序无关
pub type BatchProgressCb = Box<dyn Fn(usize) + Send + Sync>;

/// 一个批次：原文件列表的连续切片及其 0 起始序号
#[derive(Debug, Clone)]
pub struct Batch {
    pub index: usize,
    pub files: Vec<FileEntry>,
}

/// 把文件列表切成 ceil(N/B) 个连续批次：批内保持原始顺序，批间不重叠、
/// 不遗漏，并集等于输入
pub fn partition(files: &[FileEntry], batch_size: usize) -> Vec<Batch> {
    files
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            files: chunk.to_vec(),
        })
        .collect()
}

/// 并发派发所有批次并合并结果。批次之间完全独立：一个批次失败（网络、
/// 响应格式、超时）不中断、不阻塞其它批次，只为该批合成一条 action="info"
/// 的失败决定代替逐文件结果。合并结果不保证批间顺序。同时在途的批次数由
/// max_in_flight 限制（0 视为 1）
// TODO: thread a cancellation token through dispatch so a stalled batch can
// be abandoned before the transport timeout fires
pub async fn dispatch_batches(
    provider: Arc<dyn AnalysisProvider>,
    files: Vec<FileEntry>,
    batch_size: usize,
    max_in_flight: usize,
    progress: Option<BatchProgressCb>,
) -> Result<Vec<AnalysisDecision>, FileManagerError> {
    if batch_size == 0 {
        return Err(FileManagerError::InvalidArgument(
            "batch size must be positive".to_string(),
        ));
    }

    let batches = partition(&files, batch_size);
    log::info!(
        "dispatching {} files in {} batches (batch size {})",
        files.len(),
        batches.len(),
        batch_size
    );

    // 完成事件经 channel 汇到单一消费者，把回调投递从工作路径上解耦；
    // 回调 panic 在投递点捕获，不影响派发结果和后续回调
    let (tx, mut rx) = mpsc::unbounded_channel::<usize>();
    let consumer = progress.map(|cb| {
        tokio::spawn(async move {
            while let Some(ordinal) = rx.recv().await {
                let outcome =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cb(ordinal)));
                if outcome.is_err() {
                    log::warn!("progress callback panicked for batch {}", ordinal);
                }
            }
        })
    });

    let results: Vec<Vec<AnalysisDecision>> = stream::iter(batches.into_iter().map(|batch| {
        let provider = Arc::clone(&provider);
        let tx = tx.clone();
        async move {
            let ordinal = batch.index + 1;
            let decisions = match provider.analyze_batch(&batch.files).await {
                Ok(decisions) => decisions,
                Err(e) => {
                    log::warn!("batch {} failed: {}", ordinal, e);
                    vec![AnalysisDecision::batch_failure(ordinal, e)]
                }
            };
            let _ = tx.send(ordinal);
            decisions
        }
    }))
    .buffer_unordered(max_in_flight.max(1))
    .collect()
    .await;

    drop(tx);
    if let Some(handle) = consumer {
        let _ = handle.await;
    }

    Ok(results.into_iter().flatten().collect())
}
