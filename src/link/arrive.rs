//! 帧到达事件
//!
//! 链路把在途的帧调度为 `Arrive`；执行时解码并放入目的端点的收件箱，
//! 等待该端点在下一个 tick 的接收阶段取走。

use crate::driver::TransferWorld;
use crate::sim::{Event, Simulator, World};
use crate::wire::EndpointAddr;

/// 事件：一个在途帧到达目的端点。
#[derive(Debug)]
pub struct Arrive {
    pub to: EndpointAddr,
    pub frame: Vec<u8>,
}

impl Event for Arrive {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Arrive { to, frame } = *self;
        let w = world
            .as_any_mut()
            .downcast_mut::<TransferWorld>()
            .expect("world must be TransferWorld");
        w.link.deliver(to, frame, sim.now());
    }
}
