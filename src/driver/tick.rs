//! 端点 tick 事件
//!
//! 每次执行运行一个端点的接收阶段和发送阶段（固定先收后发，
//! 刚到的 ACK 才能在新段发出前推动窗口），然后把自己调度到下一个周期。
//! 端点 Closed 后停止续期，事件队列随之自然排空。

use tracing::trace;

use super::world::TransferWorld;
use crate::proto::Endpoint;
use crate::sim::{Event, SimTime, Simulator, World};
use crate::wire::EndpointAddr;

/// 事件：驱动一个端点的一个 tick。
#[derive(Debug)]
pub struct EndpointTick {
    pub addr: EndpointAddr,
    pub every: SimTime,
}

impl Event for EndpointTick {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let EndpointTick { addr, every } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<TransferWorld>()
            .expect("world must be TransferWorld");
        let TransferWorld {
            link,
            sender,
            receiver,
        } = w;

        let ep: &mut dyn Endpoint = match addr {
            EndpointAddr::A => sender,
            EndpointAddr::B => receiver,
        };

        trace!(addr = %addr, now = ?sim.now(), "端点 tick");
        ep.poll_inbound(link, sim);
        ep.drive_outbound(link, sim);

        if !ep.is_closed() {
            sim.schedule(sim.now().plus(every), EndpointTick { addr, every });
        }
    }
}
