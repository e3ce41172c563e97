//! Tick 驱动模块
//!
//! 周期性、非阻塞的轮询驱动：每个端点一个自续期的 tick 事件，
//! 同一 tick 内严格先收后发；端点到达终态后不再续期。

mod tick;
mod world;

pub use tick::EndpointTick;
pub use world::TransferWorld;

use crate::sim::{SimTime, Simulator};
use crate::wire::EndpointAddr;

/// 在 t=0 调度两个端点的首个 tick。
///
/// A 先于 B 调度；仿真器对同一时刻的事件按调度次序执行，
/// 因此每个 tick 时刻上 A 的收/发总是先于 B。
pub fn start_ticks(sim: &mut Simulator, every: SimTime) {
    sim.schedule(
        SimTime::ZERO,
        EndpointTick {
            addr: EndpointAddr::A,
            every,
        },
    );
    sim.schedule(
        SimTime::ZERO,
        EndpointTick {
            addr: EndpointAddr::B,
            every,
        },
    );
}
