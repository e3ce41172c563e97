//! 线上编码
//!
//! 固定字段的二进制帧格式（大端）：
//!
//! ```text
//! 0        1        2        3                11               19       23
//! +--------+--------+--------+----------------+----------------+--------+----
//! | src    | dst    | flags  | seq (u64)      | ack (u64)      | len    | payload
//! +--------+--------+--------+----------------+----------------+--------+----
//! ```
//!
//! flags: bit0 SYN, bit1 ACK, bit2 FIN, bit3 PAYLOAD。
//! PAYLOAD 位区分「无载荷」与「空载荷」；控制包的 len 恒为 0。

use super::addr::EndpointAddr;
use super::packet::Packet;
use thiserror::Error;

/// 帧头长度（字节）
pub const HEADER_LEN: usize = 23;

const FLAG_SYN: u8 = 1 << 0;
const FLAG_ACK: u8 = 1 << 1;
const FLAG_FIN: u8 = 1 << 2;
const FLAG_PAYLOAD: u8 = 1 << 3;
const FLAG_MASK: u8 = FLAG_SYN | FLAG_ACK | FLAG_FIN | FLAG_PAYLOAD;

/// 解码错误。出错的帧由链路静默丢弃并计数，不进入协议状态机。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("frame too short: need {need} bytes, got {got}")]
    Truncated { need: usize, got: usize },
    #[error("unknown endpoint address byte {0:#04x}")]
    BadAddr(u8),
    #[error("unknown flag bits {0:#010b}")]
    BadFlags(u8),
    #[error("payload length mismatch: header says {expect}, frame carries {got}")]
    PayloadLength { expect: usize, got: usize },
}

/// 将数据包编码为帧。
pub fn encode(pkt: &Packet) -> Vec<u8> {
    let payload = pkt.payload.as_deref().unwrap_or(&[]);
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());

    out.push(pkt.src.to_byte());
    out.push(pkt.dst.to_byte());

    let mut flags = 0u8;
    if pkt.syn {
        flags |= FLAG_SYN;
    }
    if pkt.ack_flag {
        flags |= FLAG_ACK;
    }
    if pkt.fin {
        flags |= FLAG_FIN;
    }
    if pkt.payload.is_some() {
        flags |= FLAG_PAYLOAD;
    }
    out.push(flags);

    out.extend_from_slice(&pkt.seq.to_be_bytes());
    out.extend_from_slice(&pkt.ack.to_be_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// 从帧解码数据包。
pub fn decode(frame: &[u8]) -> Result<Packet, WireError> {
    if frame.len() < HEADER_LEN {
        return Err(WireError::Truncated {
            need: HEADER_LEN,
            got: frame.len(),
        });
    }

    let src = EndpointAddr::from_byte(frame[0]).ok_or(WireError::BadAddr(frame[0]))?;
    let dst = EndpointAddr::from_byte(frame[1]).ok_or(WireError::BadAddr(frame[1]))?;

    let flags = frame[2];
    if flags & !FLAG_MASK != 0 {
        return Err(WireError::BadFlags(flags));
    }

    let seq = u64::from_be_bytes(frame[3..11].try_into().expect("fixed slice"));
    let ack = u64::from_be_bytes(frame[11..19].try_into().expect("fixed slice"));
    let len = u32::from_be_bytes(frame[19..23].try_into().expect("fixed slice")) as usize;

    let body = &frame[HEADER_LEN..];
    let payload = if flags & FLAG_PAYLOAD != 0 {
        if body.len() != len {
            return Err(WireError::PayloadLength {
                expect: len,
                got: body.len(),
            });
        }
        Some(body.to_vec())
    } else {
        if len != 0 || !body.is_empty() {
            return Err(WireError::PayloadLength {
                expect: len,
                got: body.len(),
            });
        }
        None
    };

    Ok(Packet {
        src,
        dst,
        seq,
        ack,
        syn: flags & FLAG_SYN != 0,
        ack_flag: flags & FLAG_ACK != 0,
        fin: flags & FLAG_FIN != 0,
        payload,
    })
}
