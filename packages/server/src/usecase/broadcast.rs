//! UseCase: ルーム単位のファンアウト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - Broadcaster::deliver() と Broadcaster::run()
//!
//! ### なぜこのテストが必要か
//! - 同じルームの全コネクションに届き、他のルームには届かないことを保証
//! - 書き込みに失敗したコネクションが即座に Registry から除去されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームの複数コネクションへの配信
//! - 異常系：一部のコネクションへの書き込み失敗
//! - エッジケース：宛先ルームに誰もいない場合

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{ConnectionId, ConnectionRegistry, Delivery};

use super::error::QueueClosed;

/// Default number of deliveries buffered ahead of the broadcaster
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Sending side of the broadcaster's input queue.
///
/// Cloned into every inbound reader. `submit` waits while the queue is full.
#[derive(Clone)]
pub struct BroadcastQueue {
    sender: mpsc::Sender<Delivery>,
}

impl BroadcastQueue {
    /// Create a queue holding up to `capacity` pending deliveries (at least 1).
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Delivery>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Hand a delivery to the broadcaster.
    pub async fn submit(&self, delivery: Delivery) -> Result<(), QueueClosed> {
        self.sender.send(delivery).await.map_err(|_| QueueClosed)
    }
}

/// Outcome of one fan-out round.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients the message was written to
    pub delivered: usize,
    /// Recipients whose write failed; they have been unregistered and closed
    pub dropped: Vec<ConnectionId>,
}

/// Single consumer that serializes all outbound fan-out.
pub struct Broadcaster {
    registry: Arc<dyn ConnectionRegistry>,
    receiver: mpsc::Receiver<Delivery>,
}

impl Broadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, receiver: mpsc::Receiver<Delivery>) -> Self {
        Self { registry, receiver }
    }

    /// Consume deliveries in FIFO order until every queue handle is dropped.
    pub async fn run(mut self) {
        tracing::info!("Broadcaster started");
        while let Some(delivery) = self.receiver.recv().await {
            let report = self.deliver(&delivery).await;
            tracing::debug!(
                "Delivered to {} connection(s) in room '{}' ({} dropped)",
                report.delivered,
                delivery.target,
                report.dropped.len()
            );
        }
        tracing::info!("Broadcast queue closed; broadcaster stopped");
    }

    /// Write one delivery to every connection currently in its target room.
    ///
    /// A failed write removes and closes that connection only; the remaining
    /// recipients are still attempted.
    pub async fn deliver(&self, delivery: &Delivery) -> DeliveryReport {
        let recipients = self.registry.recipients(&delivery.target).await;
        let mut report = DeliveryReport::default();

        for recipient in recipients {
            match recipient.sink.send(&delivery.message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to deliver to connection '{}' in room '{}': {}",
                        recipient.id,
                        delivery.target,
                        e
                    );
                    self.registry.unregister(&recipient.id).await;
                    recipient.sink.close().await;
                    report.dropped.push(recipient.id);
                }
            }
        }

        report
    }
}
