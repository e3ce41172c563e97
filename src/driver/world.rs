//! 传输世界实现
//!
//! 仿真世界：持有链路与两个端点。链路是两端点之间唯一共享的资源；
//! 各端点的内部状态只被自己的 tick 触碰。

use crate::link::LossyLink;
use crate::proto::{ReceiverEndpoint, SenderEndpoint};
use crate::sim::World;
use std::any::Any;

/// A→B 文件传输的仿真世界。
pub struct TransferWorld {
    pub link: LossyLink,
    pub sender: SenderEndpoint,
    pub receiver: ReceiverEndpoint,
}

impl TransferWorld {
    pub fn new(link: LossyLink, sender: SenderEndpoint, receiver: ReceiverEndpoint) -> Self {
        Self {
            link,
            sender,
            receiver,
        }
    }

    /// 两端都到达终态（传输完整收尾）。
    pub fn is_finished(&self) -> bool {
        use crate::proto::Endpoint;
        self.sender.is_closed() && self.receiver.is_closed()
    }
}

impl World for TransferWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
