// SignatureCheck - コンテンツ署名の検証

use crate::core::{
    Digester, ProcessingError, ProcessingResult, SignedRecord, TaskOutcome, UnitOfWork,
};
use async_trait::async_trait;
use std::sync::Arc;

/// ダイジェストと期待署名を比較する処理単位
pub struct SignatureCheck<D> {
    digester: Arc<D>,
}

impl<D> SignatureCheck<D>
where
    D: Digester,
{
    pub fn new(digester: D) -> Self {
        Self {
            digester: Arc::new(digester),
        }
    }

    pub fn digester(&self) -> &D {
        &self.digester
    }

    /// 1件のレコードを検証
    ///
    /// ダイジェストの比較は小文字16進表記のまま完全一致で行う
    pub fn check(&self, record: &SignedRecord) -> ProcessingResult<TaskOutcome> {
        let signature = self
            .digester
            .digest_hex(&record.content)
            .map_err(|e| ProcessingError::digest(&record.name, e))?;

        Ok(TaskOutcome {
            item_id: record.name.clone(),
            succeeded: signature == record.expected_signature,
        })
    }
}

#[async_trait]
impl<D> UnitOfWork for SignatureCheck<D>
where
    D: Digester + 'static,
{
    type Item = SignedRecord;
    type Outcome = TaskOutcome;

    fn label(&self, item: &SignedRecord) -> String {
        item.name.clone()
    }

    async fn run(&self, item: SignedRecord) -> ProcessingResult<TaskOutcome> {
        self.check(&item)
    }
}
