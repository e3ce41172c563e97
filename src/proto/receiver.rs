//! 接收端点（角色 B）
//!
//! 生命周期：Listening → SetupAcking → Established → TeardownAcking → Closed。
//! 每个到达的数据段都立刻单独应答（选择确认，重复段也重新应答以抵御
//! ACK 丢失）；载荷经乱序重组缓冲按序写入字节汇，绝不重复交付。

use tracing::{debug, info, trace};

use super::endpoint::Endpoint;
use super::io::ByteSink;
use super::reassembly::{Accepted, ReassemblyBuffer};
use crate::link::LossyLink;
use crate::sim::Simulator;
use crate::wire::{EndpointAddr, Packet};

/// 接收角色的生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    Listening,
    SetupAcking,
    Established,
    TeardownAcking,
    Closed,
}

impl ReceiverState {
    pub fn name(self) -> &'static str {
        match self {
            ReceiverState::Listening => "listening",
            ReceiverState::SetupAcking => "setup_acking",
            ReceiverState::Established => "established",
            ReceiverState::TeardownAcking => "teardown_acking",
            ReceiverState::Closed => "closed",
        }
    }
}

/// 接收端计数。
#[derive(Debug, Default)]
pub struct ReceiverStats {
    pub segments_received: u64,
    pub duplicate_segments: u64,
    pub early_segments_dropped: u64,
    pub acks_sent: u64,
    pub delivered_bytes: u64,
}

/// 角色 B：把链路上到达的数据段重组成原始字节流写入字节汇。
pub struct ReceiverEndpoint {
    state: ReceiverState,
    buffer: ReassemblyBuffer,
    sink: Box<dyn ByteSink>,
    stats: ReceiverStats,
}

impl ReceiverEndpoint {
    pub fn new(sink: Box<dyn ByteSink>) -> Self {
        Self {
            state: ReceiverState::Listening,
            buffer: ReassemblyBuffer::new(),
            sink,
            stats: ReceiverStats::default(),
        }
    }

    pub fn state(&self) -> ReceiverState {
        self.state
    }

    pub fn stats(&self) -> &ReceiverStats {
        &self.stats
    }

    pub fn expected_seq(&self) -> u64 {
        self.buffer.expected_seq()
    }

    pub fn pending_segments(&self) -> usize {
        self.buffer.pending_len()
    }

    fn transition(&mut self, to: ReceiverState, link: &mut LossyLink, sim: &Simulator) {
        info!(from = self.state.name(), to = to.name(), "B 状态迁移");
        link.trace_state_change(sim.now(), EndpointAddr::B, self.state.name(), to.name());
        self.state = to;
    }

    fn on_packet(&mut self, pkt: Packet, link: &mut LossyLink, sim: &mut Simulator) {
        if pkt.is_pure_syn() {
            match self.state {
                ReceiverState::Listening => {
                    link.send(Packet::syn_ack(pkt.seq), EndpointAddr::B, sim);
                    self.transition(ReceiverState::SetupAcking, link, sim);
                }
                ReceiverState::SetupAcking | ReceiverState::Established => {
                    // 重复 SYN：原样重答 SYN-ACK，不迁移
                    link.send(Packet::syn_ack(pkt.seq), EndpointAddr::B, sim);
                }
                _ => debug!(state = self.state.name(), "忽略 SYN"),
            }
            return;
        }

        if pkt.is_fin_ack() {
            match self.state {
                ReceiverState::Established => {
                    link.send(Packet::fin_ack(pkt.seq), EndpointAddr::B, sim);
                    self.transition(ReceiverState::TeardownAcking, link, sim);
                }
                ReceiverState::TeardownAcking => {
                    // 重复 FIN：原样重答
                    link.send(Packet::fin_ack(pkt.seq), EndpointAddr::B, sim);
                }
                _ => debug!(state = self.state.name(), "忽略 FIN-ACK"),
            }
            return;
        }

        if pkt.is_pure_ack() {
            match self.state {
                ReceiverState::SetupAcking => {
                    // 握手完成 ACK（重复到达时幂等）
                    self.transition(ReceiverState::Established, link, sim);
                }
                ReceiverState::TeardownAcking => {
                    self.transition(ReceiverState::Closed, link, sim);
                }
                _ => debug!(state = self.state.name(), ack = pkt.ack, "忽略纯 ACK"),
            }
            return;
        }

        if pkt.is_data() {
            match self.state {
                ReceiverState::Established => self.on_data(pkt, link, sim),
                _ => {
                    // 建连前/挥手后的数据段一律丢弃，超时重传会兜底
                    debug!(state = self.state.name(), seq = pkt.seq, "丢弃数据段");
                    self.stats.early_segments_dropped += 1;
                }
            }
            return;
        }

        debug!(state = self.state.name(), seq = pkt.seq, "忽略意外包");
    }

    fn on_data(&mut self, pkt: Packet, link: &mut LossyLink, sim: &mut Simulator) {
        let seq = pkt.seq;
        let payload = pkt.payload.expect("is_data 保证载荷存在");
        self.stats.segments_received += 1;

        // 1. 无条件先回选择 ACK；重复段也要重新应答（它的 ACK 可能丢了）
        self.stats.acks_sent += 1;
        link.trace_send_ack(sim.now(), seq);
        link.send(Packet::data_ack(seq), EndpointAddr::B, sim);

        // 2./3. 过期段不存，新段入缓冲
        match self.buffer.accept(seq, payload) {
            Accepted::AlreadyDelivered | Accepted::Duplicate => {
                trace!(seq, "重复数据段，不再交付");
                self.stats.duplicate_segments += 1;
                return;
            }
            Accepted::Buffered => {}
        }

        // 4. 缺口补齐多少就按序交付多少
        for (seq, payload) in self.buffer.drain() {
            trace!(seq, len = payload.len(), "按序交付");
            link.trace_deliver(sim.now(), seq, payload.len());
            self.stats.delivered_bytes += payload.len() as u64;
            self.sink.write_all(&payload);
        }
    }
}

impl Endpoint for ReceiverEndpoint {
    fn addr(&self) -> EndpointAddr {
        EndpointAddr::B
    }

    fn poll_inbound(&mut self, link: &mut LossyLink, sim: &mut Simulator) {
        while let Some(pkt) = link.recv(EndpointAddr::B) {
            self.on_packet(pkt, link, sim);
        }
    }

    fn drive_outbound(&mut self, _link: &mut LossyLink, _sim: &mut Simulator) {
        // B 只在接收路径上发控制/ACK 包，周期性发送阶段无事可做
    }

    fn is_closed(&self) -> bool {
        self.state == ReceiverState::Closed
    }
}
