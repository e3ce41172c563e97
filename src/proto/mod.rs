//! 传输协议模块
//!
//! 可靠有序字节流传输的端点逻辑：连接生命周期状态机、
//! 选择重传发送窗口、乱序重组缓冲。A 固定为发送角色，B 固定为接收角色，
//! 角色在构造时选定（一个能力 trait，两个角色实现）。

mod config;
mod endpoint;
mod io;
mod reassembly;
mod receiver;
mod sender;
mod window;

pub use config::TransferConfig;
pub use endpoint::Endpoint;
pub use io::{ByteSink, ByteSource, MemSink, MemSource};
pub use reassembly::{Accepted, ReassemblyBuffer};
pub use receiver::{ReceiverEndpoint, ReceiverState, ReceiverStats};
pub use sender::{SenderEndpoint, SenderState, SenderStats};
pub use window::{AckOutcome, OutstandingSegment, SendWindow};

/// 数据段序号从 1 起；0 留给 SYN/FIN。
pub const FIRST_DATA_SEQ: u64 = 1;
