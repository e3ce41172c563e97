//! 选择重传发送窗口
//!
//! 在途段以序号为键放在有序 map 里，`base` 是显式游标：
//! 窗口只在 base 段被确认后整体前移；base 之后的段确认只做标记，
//! 已标记的段即使 base 停滞也不再重传（选择重传，非累计确认）。

use std::collections::BTreeMap;

use tracing::trace;

use super::FIRST_DATA_SEQ;
use crate::sim::SimTime;
use crate::wire::Packet;

/// 一个未确认数据段的发送端记录。
#[derive(Debug, Clone)]
pub struct OutstandingSegment {
    pub seq: u64,
    /// 最近一次发出的原样数据包；重传时逐字节复用
    pub packet: Packet,
    pub last_sent_at: SimTime,
    pub acked: bool,
}

/// ACK 处理结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckOutcome {
    /// 首次确认了一个在途段
    Acked,
    /// 该段已确认过，重复 ACK，无操作
    Duplicate,
    /// 不对应任何在途段，忽略
    Unknown,
}

impl AckOutcome {
    pub fn name(self) -> &'static str {
        match self {
            AckOutcome::Acked => "acked",
            AckOutcome::Duplicate => "duplicate",
            AckOutcome::Unknown => "unknown",
        }
    }
}

/// 选择重传发送窗口。
pub struct SendWindow {
    base: u64,
    next_seq: u64,
    window_size: u64,
    timeout: SimTime,
    outstanding: BTreeMap<u64, OutstandingSegment>,
    eof: bool,
}

impl SendWindow {
    pub fn new(window_size: u64, timeout: SimTime) -> Self {
        Self {
            base: FIRST_DATA_SEQ,
            next_seq: FIRST_DATA_SEQ,
            window_size,
            timeout,
            outstanding: BTreeMap::new(),
            eof: false,
        }
    }

    /// 最老的尚未滑过的序号。
    pub fn base(&self) -> u64 {
        self.base
    }

    /// 下一个新数据段将使用的序号。
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// 在途（未滑过）的段数。
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// 在途集合是否已清空。
    pub fn is_drained(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn eof(&self) -> bool {
        self.eof
    }

    /// 输入源已耗尽，不再有新数据段。
    pub fn mark_eof(&mut self) {
        self.eof = true;
    }

    /// 是否还允许发出新数据段（未到 EOF 且窗口未满）。
    pub fn can_admit(&self) -> bool {
        !self.eof && self.next_seq < self.base + self.window_size
    }

    /// 登记一个刚发出的新数据段。序号必须等于 `next_seq`。
    pub fn register_sent(&mut self, packet: Packet, now: SimTime) {
        debug_assert_eq!(packet.seq, self.next_seq, "新段必须按序号连续发出");
        let seq = packet.seq;
        self.outstanding.insert(
            seq,
            OutstandingSegment {
                seq,
                packet,
                last_sent_at: now,
                acked: false,
            },
        );
        self.next_seq += 1;
    }

    /// 收集所有超时且未确认的段并刷新其发送时刻。
    ///
    /// 超时判定对每段独立，间隔固定；返回的包与上次发送逐字节一致。
    pub fn due_retransmits(&mut self, now: SimTime) -> Vec<Packet> {
        let mut due = Vec::new();
        for seg in self.outstanding.values_mut() {
            if !seg.acked && now.since(seg.last_sent_at) > self.timeout {
                seg.last_sent_at = now;
                due.push(seg.packet.clone());
            }
        }
        due
    }

    /// 处理一个数据 ACK：标记对应段，再把 base 滑过所有已确认的前缀。
    ///
    /// 段只有在「已确认且正处于 base」时才被移除；base 之后的确认只做标记。
    pub fn on_ack(&mut self, ack: u64) -> AckOutcome {
        let outcome = match self.outstanding.get_mut(&ack) {
            Some(seg) if seg.acked => AckOutcome::Duplicate,
            Some(seg) => {
                seg.acked = true;
                AckOutcome::Acked
            }
            None => AckOutcome::Unknown,
        };

        if outcome == AckOutcome::Acked {
            while self
                .outstanding
                .get(&self.base)
                .is_some_and(|seg| seg.acked)
            {
                self.outstanding.remove(&self.base);
                self.base += 1;
            }
            trace!(ack, base = self.base, in_flight = self.outstanding.len(), "窗口前移检查");
        }

        outcome
    }
}
