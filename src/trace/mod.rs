//! 结构化事件记录（用于离线 JSON 回放/分析）
//!
//! 设计目标：
//! - **结构化**：用 JSON 事件而不是解析文本日志
//! - **轻量**：不引入运行时服务，仅在内存中追加
//! - **可回放**：链路层与协议层事件共用一条时间轴

mod types;

pub use types::{TraceEvent, TraceEventKind, TraceLogger};
