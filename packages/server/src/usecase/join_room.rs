//! UseCase: ルームへの参加
//!
//! ハンドシェイク完了直後に呼ばれ、新しいコネクション ID を払い出して Registry に登録する。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionIdFactory, ConnectionRegistry, ConnectionSink, RoomId, Timestamp,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// コネクションを `room` に登録し、その ID を返す
    ///
    /// ルームの存在確認や人数制限は行わない。
    pub async fn execute(&self, room: RoomId, sink: &Arc<dyn ConnectionSink>) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        self.registry
            .register(id, room, sink, Timestamp::now())
            .await;
        id
    }
}
