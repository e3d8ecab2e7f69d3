//! UseCase: 予約ルームへの帯域外シグナル
//!
//! HTTP API から受け取った値を、予約ルームに登録された全コネクションへ
//! ブロードキャスタ経由で配信する。

use crate::domain::Delivery;

use super::{broadcast::BroadcastQueue, error::SignalError};

/// シグナル送信のユースケース
pub struct SignalRoomUseCase {
    queue: BroadcastQueue,
}

impl SignalRoomUseCase {
    /// 新しい SignalRoomUseCase を作成
    pub fn new(queue: BroadcastQueue) -> Self {
        Self { queue }
    }

    /// `value` を予約ルームへの配信としてキューに投入する
    ///
    /// # Errors
    ///
    /// * `SignalError::MissingValue` - 値が空
    /// * `SignalError::QueueClosed` - ブロードキャスタが停止している
    pub async fn execute(&self, value: &str) -> Result<(), SignalError> {
        if value.is_empty() {
            return Err(SignalError::MissingValue);
        }
        self.queue.submit(Delivery::signal(value)).await?;
        Ok(())
    }
}
