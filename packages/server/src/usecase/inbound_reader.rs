//! UseCase: コネクションごとの受信ループ
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - InboundReader::run() メソッド
//!
//! ### なぜこのテストが必要か
//! - クライアントが指定した room_id が必ず送信者のルームで上書きされることを保証（なりすまし防止）
//! - 読み込み失敗・切断時に Registry から必ず除去されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：受信順にキューへ投入される
//! - 異常系：途中での読み込み失敗、ブロードキャスタの停止
//! - エッジケース：一度もメッセージを送らずに切断

use std::sync::Arc;

use futures_util::{Stream, StreamExt};

use crate::domain::{
    ConnectionId, ConnectionRegistry, Delivery, RelayMessage, RoomId, TransportError,
};

use super::broadcast::BroadcastQueue;

/// Why a reader stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderExit {
    /// Orderly close by the peer
    Closed,
    /// A frame could not be read or decoded
    ReadFailed(TransportError),
    /// The broadcaster is gone
    QueueClosed,
}

/// Read side of one connection.
pub struct InboundReader {
    connection_id: ConnectionId,
    room: RoomId,
    registry: Arc<dyn ConnectionRegistry>,
    queue: BroadcastQueue,
}

impl InboundReader {
    pub fn new(
        connection_id: ConnectionId,
        room: RoomId,
        registry: Arc<dyn ConnectionRegistry>,
        queue: BroadcastQueue,
    ) -> Self {
        Self {
            connection_id,
            room,
            registry,
            queue,
        }
    }

    /// Forward every decoded message to the broadcaster until the stream
    /// fails or ends, then unregister the connection.
    pub async fn run<S>(self, mut inbound: S) -> ReaderExit
    where
        S: Stream<Item = Result<RelayMessage, TransportError>> + Unpin + Send,
    {
        let exit = loop {
            match inbound.next().await {
                Some(Ok(message)) => {
                    let delivery = Delivery::relay(&self.room, message);
                    if self.queue.submit(delivery).await.is_err() {
                        break ReaderExit::QueueClosed;
                    }
                }
                Some(Err(TransportError::Closed)) | None => break ReaderExit::Closed,
                Some(Err(e)) => break ReaderExit::ReadFailed(e),
            }
        };

        self.registry.unregister(&self.connection_id).await;
        tracing::debug!(
            "Reader for connection '{}' in room '{}' stopped: {:?}",
            self.connection_id,
            self.room,
            exit
        );
        exit
    }
}
