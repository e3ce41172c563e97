//! 链路模块
//!
//! 模拟两端点之间不可靠、带时延的链路：丢包、复制、乱序（抖动）均在此注入。
//! 端点只通过 `send`/`recv` 这对非阻塞契约访问链路，不直接触碰内部状态。

mod arrive;
mod channel;
mod faults;
mod link_trace;
mod stats;

pub use arrive::Arrive;
pub use channel::LossyLink;
pub use faults::{FaultConfig, FaultScope};
pub use stats::LinkStats;
