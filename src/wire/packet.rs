//! 数据包类型
//!
//! 定义端点间交换的数据包及各控制形态的构造函数。
//! 每个包最多携带一种主语义（数据 / SYN / FIN）；ACK 可与 SYN、FIN 合并，
//! 也可单独出现（纯 ACK，payload 为空）。

use super::addr::EndpointAddr;

/// 端点间交换的数据包。
///
/// `payload` 仅在数据段上存在；控制包一律不带载荷。
/// `ack` 的含义依上下文而定：数据 ACK 精确回显被确认的 seq（选择确认），
/// 握手/挥手应答则为对端 seq + 1。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub src: EndpointAddr,
    pub dst: EndpointAddr,
    pub seq: u64,
    pub ack: u64,
    pub syn: bool,
    pub ack_flag: bool,
    pub fin: bool,
    pub payload: Option<Vec<u8>>,
}

impl Packet {
    fn control(src: EndpointAddr, seq: u64, ack: u64, syn: bool, ack_flag: bool, fin: bool) -> Packet {
        Packet {
            src,
            dst: src.peer(),
            seq,
            ack,
            syn,
            ack_flag,
            fin,
            payload: None,
        }
    }

    /// 连接建立第一步：A 发出的纯 SYN（seq 0）。
    pub fn syn() -> Packet {
        Packet::control(EndpointAddr::A, 0, 0, true, false, false)
    }

    /// 连接建立第二步：B 对 SYN 的应答（SYN+ACK，ack = 对端 seq + 1）。
    pub fn syn_ack(peer_seq: u64) -> Packet {
        Packet::control(EndpointAddr::B, 0, peer_seq.wrapping_add(1), true, true, false)
    }

    /// 连接建立第三步：A 发出的握手完成纯 ACK。
    pub fn handshake_ack(peer_seq: u64) -> Packet {
        Packet::control(EndpointAddr::A, 1, peer_seq.wrapping_add(1), false, true, false)
    }

    /// A 发出的数据段。
    pub fn data(seq: u64, payload: Vec<u8>) -> Packet {
        Packet {
            src: EndpointAddr::A,
            dst: EndpointAddr::B,
            seq,
            ack: 0,
            syn: false,
            ack_flag: false,
            fin: false,
            payload: Some(payload),
        }
    }

    /// B 对数据段的选择确认：ack 精确等于被确认的 seq。
    pub fn data_ack(seq: u64) -> Packet {
        Packet::control(EndpointAddr::B, 0, seq, false, true, false)
    }

    /// 挥手第一步：A 在全部数据确认后发出的 FIN+ACK（seq 0）。
    pub fn fin() -> Packet {
        Packet::control(EndpointAddr::A, 0, 0, false, true, true)
    }

    /// 挥手第二步：B 对 FIN 的应答（FIN+ACK，ack = 对端 seq + 1）。
    pub fn fin_ack(peer_seq: u64) -> Packet {
        Packet::control(EndpointAddr::B, 0, peer_seq.wrapping_add(1), false, true, true)
    }

    /// 挥手第三步：A 发出的挥手完成纯 ACK。
    pub fn teardown_ack(peer_seq: u64) -> Packet {
        Packet::control(EndpointAddr::A, 0, peer_seq.wrapping_add(1), false, true, false)
    }

    /// 纯 SYN：SYN 置位，ACK/FIN 清零。
    pub fn is_pure_syn(&self) -> bool {
        self.syn && !self.ack_flag && !self.fin
    }

    /// SYN+ACK 应答。
    pub fn is_syn_ack(&self) -> bool {
        self.syn && self.ack_flag && !self.fin
    }

    /// FIN+ACK（发起或应答均为此形态）。
    pub fn is_fin_ack(&self) -> bool {
        self.fin && self.ack_flag && !self.syn
    }

    /// 纯 ACK：无载荷、无 SYN/FIN 的单独确认。
    pub fn is_pure_ack(&self) -> bool {
        self.ack_flag && !self.syn && !self.fin && self.payload.is_none()
    }

    /// 数据段：携带载荷且无 SYN/FIN。
    pub fn is_data(&self) -> bool {
        self.payload.is_some() && !self.syn && !self.fin
    }

    pub fn payload_len(&self) -> usize {
        self.payload.as_ref().map_or(0, |p| p.len())
    }
}
