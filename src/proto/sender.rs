//! 发送端点（角色 A）
//!
//! 生命周期：Idle → SetupInFlight → Established → TeardownInFlight → Closed。
//! Established 阶段由选择重传窗口驱动数据；全部数据确认并读尽输入后
//! 才发起挥手。意外或畸形的控制包一律静默忽略，应答对相同输入幂等。

use tracing::{debug, info, trace};

use super::config::TransferConfig;
use super::endpoint::Endpoint;
use super::io::ByteSource;
use super::window::{AckOutcome, SendWindow};
use crate::link::LossyLink;
use crate::sim::Simulator;
use crate::wire::{EndpointAddr, Packet};

/// 发送角色的生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderState {
    Idle,
    SetupInFlight,
    Established,
    TeardownInFlight,
    Closed,
}

impl SenderState {
    pub fn name(self) -> &'static str {
        match self {
            SenderState::Idle => "idle",
            SenderState::SetupInFlight => "setup_in_flight",
            SenderState::Established => "established",
            SenderState::TeardownInFlight => "teardown_in_flight",
            SenderState::Closed => "closed",
        }
    }
}

/// 发送端计数。
#[derive(Debug, Default)]
pub struct SenderStats {
    pub segments_sent: u64,
    pub retransmissions: u64,
    pub acks_received: u64,
    pub duplicate_acks: u64,
    pub unknown_acks: u64,
}

/// 角色 A：把字节源通过不可靠链路可靠地送到 B。
pub struct SenderEndpoint {
    cfg: TransferConfig,
    state: SenderState,
    window: SendWindow,
    source: Box<dyn ByteSource>,
    stats: SenderStats,
}

impl SenderEndpoint {
    pub fn new(cfg: TransferConfig, source: Box<dyn ByteSource>) -> Self {
        let window = SendWindow::new(cfg.window_size, cfg.retrans_timeout);
        Self {
            cfg,
            state: SenderState::Idle,
            window,
            source,
            stats: SenderStats::default(),
        }
    }

    pub fn state(&self) -> SenderState {
        self.state
    }

    pub fn stats(&self) -> &SenderStats {
        &self.stats
    }

    pub fn window(&self) -> &SendWindow {
        &self.window
    }

    fn transition(&mut self, to: SenderState, link: &mut LossyLink, sim: &Simulator) {
        info!(from = self.state.name(), to = to.name(), "A 状态迁移");
        link.trace_state_change(sim.now(), EndpointAddr::A, self.state.name(), to.name());
        self.state = to;
    }

    fn on_packet(&mut self, pkt: Packet, link: &mut LossyLink, sim: &mut Simulator) {
        if pkt.is_syn_ack() {
            match self.state {
                SenderState::SetupInFlight => {
                    let reply = Packet::handshake_ack(pkt.seq);
                    link.send(reply, EndpointAddr::A, sim);
                    self.transition(SenderState::Established, link, sim);
                }
                SenderState::Established => {
                    // 重复的 SYN-ACK：握手 ACK 可能丢了，原样重答，不迁移
                    let reply = Packet::handshake_ack(pkt.seq);
                    link.send(reply, EndpointAddr::A, sim);
                }
                _ => debug!(state = self.state.name(), "忽略 SYN-ACK"),
            }
            return;
        }

        if pkt.is_fin_ack() {
            match self.state {
                SenderState::TeardownInFlight => {
                    let reply = Packet::teardown_ack(pkt.seq);
                    link.send(reply, EndpointAddr::A, sim);
                    self.transition(SenderState::Closed, link, sim);
                }
                _ => debug!(state = self.state.name(), "忽略 FIN-ACK"),
            }
            return;
        }

        if pkt.is_pure_ack() {
            match self.state {
                SenderState::Established | SenderState::TeardownInFlight => {
                    let outcome = self.window.on_ack(pkt.ack);
                    self.stats.acks_received += 1;
                    match outcome {
                        AckOutcome::Duplicate => self.stats.duplicate_acks += 1,
                        AckOutcome::Unknown => self.stats.unknown_acks += 1,
                        AckOutcome::Acked => {}
                    }
                    link.trace_recv_ack(sim.now(), pkt.ack, outcome.name());
                    trace!(
                        ack = pkt.ack,
                        outcome = outcome.name(),
                        base = self.window.base(),
                        "收到选择 ACK"
                    );
                }
                _ => debug!(state = self.state.name(), ack = pkt.ack, "忽略 ACK"),
            }
            return;
        }

        // 其余形态（数据、纯 SYN 等）对 A 都是意外包
        debug!(state = self.state.name(), seq = pkt.seq, "忽略意外包");
    }
}

impl Endpoint for SenderEndpoint {
    fn addr(&self) -> EndpointAddr {
        EndpointAddr::A
    }

    fn poll_inbound(&mut self, link: &mut LossyLink, sim: &mut Simulator) {
        while let Some(pkt) = link.recv(EndpointAddr::A) {
            self.on_packet(pkt, link, sim);
        }
    }

    fn drive_outbound(&mut self, link: &mut LossyLink, sim: &mut Simulator) {
        match self.state {
            SenderState::Idle => {
                // 首个 tick：发出 SYN。SYN 与数据不同 tick。
                link.send(Packet::syn(), EndpointAddr::A, sim);
                self.transition(SenderState::SetupInFlight, link, sim);
            }
            SenderState::SetupInFlight => {
                // 等待 SYN-ACK；SYN 不重传
            }
            SenderState::Established => {
                let now = sim.now();

                // 1. 超时重传先于新段的首次发送
                for pkt in self.window.due_retransmits(now) {
                    self.stats.retransmissions += 1;
                    debug!(seq = pkt.seq, "超时重传");
                    link.trace_send_data(now, pkt.seq, pkt.payload_len(), true);
                    link.send(pkt, EndpointAddr::A, sim);
                }

                // 2. 窗口有空位就继续读源发新段
                while self.window.can_admit() {
                    let chunk = self.source.read_chunk(self.cfg.mss);
                    if chunk.is_empty() {
                        self.window.mark_eof();
                        break;
                    }
                    let seq = self.window.next_seq();
                    let pkt = Packet::data(seq, chunk);
                    self.window.register_sent(pkt.clone(), now);
                    self.stats.segments_sent += 1;
                    trace!(seq, len = pkt.payload_len(), "发出新数据段");
                    link.trace_send_data(now, seq, pkt.payload_len(), false);
                    link.send(pkt, EndpointAddr::A, sim);
                }

                // 3. 读尽且在途清空后发起挥手
                if self.window.eof() && self.window.is_drained() {
                    link.send(Packet::fin(), EndpointAddr::A, sim);
                    self.transition(SenderState::TeardownInFlight, link, sim);
                }
            }
            SenderState::TeardownInFlight | SenderState::Closed => {
                // 等待 FIN-ACK / 已关闭；FIN 不重传
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.state == SenderState::Closed
    }
}
