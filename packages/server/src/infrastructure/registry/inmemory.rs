//! InMemory Connection Registry 実装
//!
//! HashMap をインメモリ DB として使用します。全ての操作は単一の Mutex で排他されるため、
//! ブロードキャスト中のスナップショット取得と登録・解除が競合しません。

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Weak},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRegistry, ConnectionSink, Recipient, RoomId, RoomOccupancy, Timestamp,
};

/// 登録済みコネクション
struct RegisteredConnection {
    room: RoomId,
    /// 所有権はハンドラ側にあるため弱参照のみ保持する
    sink: Weak<dyn ConnectionSink>,
    connected_at: Timestamp,
}

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, RegisteredConnection>>,
}

impl InMemoryConnectionRegistry {
    /// 新しい InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(
        &self,
        id: ConnectionId,
        room: RoomId,
        sink: &Arc<dyn ConnectionSink>,
        connected_at: Timestamp,
    ) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            id,
            RegisteredConnection {
                room,
                sink: Arc::downgrade(sink),
                connected_at,
            },
        );
    }

    async fn unregister(&self, id: &ConnectionId) -> Option<RoomId> {
        let mut connections = self.connections.lock().await;
        connections.remove(id).map(|entry| entry.room)
    }

    async fn recipients(&self, room: &RoomId) -> Vec<Recipient> {
        let mut connections = self.connections.lock().await;
        let mut recipients = Vec::new();
        let mut dead = Vec::new();

        for (id, entry) in connections.iter() {
            if &entry.room != room {
                continue;
            }
            match entry.sink.upgrade() {
                Some(sink) => recipients.push(Recipient { id: *id, sink }),
                None => dead.push(*id),
            }
        }

        // The owning handler is gone without unregistering; drop the stale entry.
        for id in dead {
            tracing::debug!("Pruning stale registry entry '{}'", id);
            connections.remove(&id);
        }

        recipients
    }

    async fn room_of(&self, id: &ConnectionId) -> Option<RoomId> {
        let connections = self.connections.lock().await;
        connections.get(id).map(|entry| entry.room.clone())
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }

    async fn occupancy(&self) -> Vec<RoomOccupancy> {
        let connections = self.connections.lock().await;
        let mut rooms: BTreeMap<&RoomId, (usize, Timestamp)> = BTreeMap::new();

        for entry in connections.values() {
            rooms
                .entry(&entry.room)
                .and_modify(|(count, since)| {
                    *count += 1;
                    *since = (*since).min(entry.connected_at);
                })
                .or_insert((1, entry.connected_at));
        }

        rooms
            .into_iter()
            .map(|(room, (connections, since))| RoomOccupancy {
                room: room.clone(),
                connections,
                since,
            })
            .collect()
    }
}
