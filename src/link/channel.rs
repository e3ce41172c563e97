//! 不可靠链路
//!
//! 两个方向各维护一个收件箱；`send` 即发即忘，把编码后的帧按
//! 时延+抖动调度为 `Arrive` 事件，途中可能被丢弃或复制；`recv` 非阻塞，
//! 没有就绪的帧时返回 `None`。解码失败的帧在到达时静默丢弃。

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::arrive::Arrive;
use super::faults::{FaultConfig, FaultScope};
use super::stats::LinkStats;
use crate::sim::{SimTime, Simulator};
use crate::trace::TraceLogger;
use crate::wire::{self, EndpointAddr, Packet};

/// 不可靠链路：两端点之间唯一共享的资源。
pub struct LossyLink {
    latency: SimTime,
    faults: FaultConfig,
    rng: StdRng,
    inbox_a: VecDeque<Packet>,
    inbox_b: VecDeque<Packet>,
    // 每个方向的发送序号，脚本化丢弃按此索引
    sent_a_to_b: u64,
    sent_b_to_a: u64,
    pub stats: LinkStats,
    pub trace: Option<TraceLogger>,
}

impl LossyLink {
    pub fn new(latency: SimTime, faults: FaultConfig) -> Self {
        let rng = StdRng::seed_from_u64(faults.seed);
        Self {
            latency,
            faults,
            rng,
            inbox_a: VecDeque::new(),
            inbox_b: VecDeque::new(),
            sent_a_to_b: 0,
            sent_b_to_a: 0,
            stats: LinkStats::default(),
            trace: None,
        }
    }

    pub fn latency(&self) -> SimTime {
        self.latency
    }

    /// 数据面帧：A→B 的数据段，或 B→A 的选择 ACK。
    /// 这两类丢了都有重传/重 ACK 兜底；其余是一次性的控制帧。
    fn is_data_plane(pkt: &Packet) -> bool {
        match pkt.src {
            EndpointAddr::A => pkt.is_data(),
            EndpointAddr::B => pkt.is_pure_ack(),
        }
    }

    /// 发送一个数据包（即发即忘，不阻塞、不同步报错）。
    ///
    /// `src` 必须是数据包的发出端。
    pub fn send(&mut self, pkt: Packet, src: EndpointAddr, sim: &mut Simulator) {
        debug_assert_eq!(pkt.src, src, "send 的 src 与包头不一致");

        let send_idx = match src {
            EndpointAddr::A => {
                let idx = self.sent_a_to_b;
                self.sent_a_to_b += 1;
                idx
            }
            EndpointAddr::B => {
                let idx = self.sent_b_to_a;
                self.sent_b_to_a += 1;
                idx
            }
        };

        let frame = wire::encode(&pkt);
        self.stats.sent_pkts += 1;
        self.stats.sent_bytes += frame.len() as u64;
        self.trace_link_send(sim.now(), &pkt, frame.len());

        let forced = match src {
            EndpointAddr::A => self.faults.drop_a_to_b.contains(&send_idx),
            EndpointAddr::B => self.faults.drop_b_to_a.contains(&send_idx),
        };
        if forced {
            debug!(from = %src, seq = pkt.seq, send_idx, "脚本丢弃");
            self.stats.dropped_pkts += 1;
            self.trace_link_drop(sim.now(), &pkt, true);
            return;
        }

        let eligible = match self.faults.scope {
            FaultScope::All => true,
            FaultScope::DataPlane => Self::is_data_plane(&pkt),
        };

        if eligible && self.faults.loss > 0.0 && self.rng.gen_bool(self.faults.loss) {
            debug!(from = %src, seq = pkt.seq, "概率丢包");
            self.stats.dropped_pkts += 1;
            self.trace_link_drop(sim.now(), &pkt, false);
            return;
        }

        let arrive_at = self.arrival_time(sim.now());
        trace!(from = %src, seq = pkt.seq, arrive = ?arrive_at, "调度投递");
        sim.schedule(
            arrive_at,
            Arrive {
                to: pkt.dst,
                frame: frame.clone(),
            },
        );

        if eligible && self.faults.dup > 0.0 && self.rng.gen_bool(self.faults.dup) {
            let dup_at = self.arrival_time(sim.now());
            debug!(from = %src, seq = pkt.seq, arrive = ?dup_at, "链路复制");
            self.stats.duplicated_pkts += 1;
            self.trace_link_duplicate(sim.now(), &pkt);
            sim.schedule(dup_at, Arrive { to: pkt.dst, frame });
        }
    }

    fn arrival_time(&mut self, now: SimTime) -> SimTime {
        let jitter = if self.faults.jitter.0 == 0 {
            SimTime::ZERO
        } else {
            SimTime(self.rng.gen_range(0..=self.faults.jitter.0))
        };
        now.plus(self.latency).plus(jitter)
    }

    /// 取出下一个已就绪的数据包；没有则返回 `None`（绝不阻塞）。
    pub fn recv(&mut self, dst: EndpointAddr) -> Option<Packet> {
        match dst {
            EndpointAddr::A => self.inbox_a.pop_front(),
            EndpointAddr::B => self.inbox_b.pop_front(),
        }
    }

    /// 帧到达：解码并放入对应收件箱。解码失败则静默丢弃并计数。
    pub(crate) fn deliver(&mut self, to: EndpointAddr, frame: Vec<u8>, now: SimTime) {
        match wire::decode(&frame) {
            Ok(pkt) => {
                trace!(to = %to, seq = pkt.seq, "帧到达收件箱");
                self.stats.delivered_pkts += 1;
                self.stats.delivered_bytes += frame.len() as u64;
                self.trace_link_deliver(now, &pkt);
                match to {
                    EndpointAddr::A => self.inbox_a.push_back(pkt),
                    EndpointAddr::B => self.inbox_b.push_back(pkt),
                }
            }
            Err(err) => {
                debug!(to = %to, %err, "帧解码失败，丢弃");
                self.stats.decode_errors += 1;
                self.trace_link_decode_error(now, to, &err);
            }
        }
    }
}
