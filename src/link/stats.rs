//! 链路统计
//!
//! 记录链路层面的收发/丢弃计数，字节数按线上帧计。

/// 链路统计信息
#[derive(Debug, Default)]
pub struct LinkStats {
    pub sent_pkts: u64,
    pub sent_bytes: u64,
    pub delivered_pkts: u64,
    pub delivered_bytes: u64,
    pub dropped_pkts: u64,
    pub duplicated_pkts: u64,
    pub decode_errors: u64,
}
