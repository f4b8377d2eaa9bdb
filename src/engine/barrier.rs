// CompletionBarrier - 全タスクの終了を待つカウントダウン

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct BarrierState {
    pending: AtomicUsize,
    finished: AtomicUsize,
    notify: Notify,
}

/// 登録済みタスクが全て終了するまで待機するバリア
///
/// タスクはディスパッチ前に `register` で登録し、
/// 返された `CompletionGuard` をタスク終了まで保持する
#[derive(Debug, Clone, Default)]
pub struct CompletionBarrier {
    state: Arc<BarrierState>,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// タスクを1件登録し、終了通知用のガードを返す
    pub fn register(&self) -> CompletionGuard {
        self.state.pending.fetch_add(1, Ordering::AcqRel);
        CompletionGuard {
            state: Arc::clone(&self.state),
        }
    }

    /// タスクをまとめて登録し、件数分のガードを返す
    ///
    /// 残数は1回の加算でN件分に設定されるため、
    /// 起動済みのタスクが先に終了しても途中で0にならない
    pub fn register_many(&self, count: usize) -> Vec<CompletionGuard> {
        self.state.pending.fetch_add(count, Ordering::AcqRel);
        (0..count)
            .map(|_| CompletionGuard {
                state: Arc::clone(&self.state),
            })
            .collect()
    }

    /// 未終了のタスク数
    pub fn pending(&self) -> usize {
        self.state.pending.load(Ordering::Acquire)
    }

    /// ガードが解放された（終了処理が走った）回数
    pub fn finished(&self) -> usize {
        self.state.finished.load(Ordering::Acquire)
    }

    /// 未終了タスクが0になるまで待機
    ///
    /// 何も登録されていなければ即座に戻る
    pub async fn wait(&self) {
        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            // 残数を確認する前に通知待ちを登録し、取りこぼしを防ぐ
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// タスク終了時に必ずバリアを1減らすガード
///
/// 正常終了・早期リターン・パニックのいずれでもDropで解放される
#[derive(Debug)]
#[must_use = "ガードを即座に捨てるとタスク開始前に終了扱いになります"]
pub struct CompletionGuard {
    state: Arc<BarrierState>,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.state.finished.fetch_add(1, Ordering::AcqRel);
        if self.state.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.state.notify.notify_waiters();
        }
    }
}
