// Dispatcher - アイテム1件につき1タスクを起動するファンアウト

use super::barrier::CompletionBarrier;
use crate::core::{OutcomeSink, ProcessingError, ProgressReporter, UnitOfWork};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

/// タスク結果の集計カウンター
#[derive(Debug, Clone, Default)]
pub struct DispatchCounters {
    outcomes: Arc<AtomicUsize>,
    errors: Arc<AtomicUsize>,
}

impl DispatchCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 結果を生成したタスク数
    pub fn outcomes(&self) -> usize {
        self.outcomes.load(Ordering::Relaxed)
    }

    /// 結果なしで終了したタスク数
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

/// 各タスクが共有する依存関係
pub struct TaskContext<U, S, R> {
    pub unit: Arc<U>,
    pub sink: Arc<S>,
    pub reporter: Arc<R>,
    pub counters: DispatchCounters,
    pub task_timeout: Option<Duration>,
}

impl<U, S, R> Clone for TaskContext<U, S, R> {
    fn clone(&self) -> Self {
        Self {
            unit: Arc::clone(&self.unit),
            sink: Arc::clone(&self.sink),
            reporter: Arc::clone(&self.reporter),
            counters: self.counters.clone(),
            task_timeout: self.task_timeout,
        }
    }
}

/// アイテムごとにタスクを起動する
///
/// 全アイテム分をバリアに登録してから起動を始め、アイテムは値で渡される。
/// 同時実行数の上限は設けない
pub fn spawn_fan_out<U, S, R>(
    items: Vec<U::Item>,
    context: &TaskContext<U, S, R>,
    barrier: &CompletionBarrier,
) where
    U: UnitOfWork + 'static,
    S: OutcomeSink<U::Outcome> + 'static,
    R: ProgressReporter + 'static,
{
    let guards = barrier.register_many(items.len());

    for (item, guard) in items.into_iter().zip(guards) {
        let context = context.clone();

        tokio::spawn(async move {
            let _guard = guard;
            run_task(context, item).await;
        });
    }
}

/// 1件の処理を実行し、結果を受け取り口へ、失敗をレポーターへ渡す
///
/// 処理単位内のパニックもそのアイテムの失敗として扱う
async fn run_task<U, S, R>(context: TaskContext<U, S, R>, item: U::Item)
where
    U: UnitOfWork + 'static,
    S: OutcomeSink<U::Outcome> + 'static,
    R: ProgressReporter + 'static,
{
    let label = context.unit.label(&item);
    let work = AssertUnwindSafe(context.unit.run(item)).catch_unwind();

    let result = match context.task_timeout {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .unwrap_or_else(|_| Ok(Err(ProcessingError::timeout(&label, limit)))),
        None => work.await,
    }
    .unwrap_or_else(|payload| Err(ProcessingError::panicked(&label, panic_message(&*payload))));

    match result {
        Ok(outcome) => {
            context.counters.outcomes.fetch_add(1, Ordering::Relaxed);
            context.sink.record(outcome).await;
        }
        Err(error) => {
            context.counters.errors.fetch_add(1, Ordering::Relaxed);
            context
                .reporter
                .report_error(&label, &error.to_string())
                .await;
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
