//! UseCase 層
//!
//! リレーのビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の trait を通じて Registry と接続を操作します。

pub mod broadcast;
pub mod error;
pub mod inbound_reader;
pub mod join_room;
pub mod leave_room;
pub mod signal_room;

pub use broadcast::{BroadcastQueue, Broadcaster, DEFAULT_QUEUE_CAPACITY, DeliveryReport};
pub use error::{QueueClosed, SignalError};
pub use inbound_reader::{InboundReader, ReaderExit};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use signal_room::SignalRoomUseCase;
