//! UseCase: ルームからの退出
//!
//! リーダーの終了後にハンドラから呼ばれる。リーダーやブロードキャスタが既に
//! 登録を解除している場合もあるため、何度呼んでもよい。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, RoomId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 登録を解除する
    ///
    /// # Returns
    ///
    /// * `Some(RoomId)` - このコールで解除された場合、所属していたルーム
    /// * `None` - 既に解除済み
    pub async fn execute(&self, id: &ConnectionId) -> Option<RoomId> {
        self.registry.unregister(id).await
    }

    /// 残りのコネクション数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.registry.count().await
    }
}
