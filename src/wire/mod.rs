//! 报文模块
//!
//! 定义端点间交换的数据包及其线上编码。
//! 链路上传输的是编码后的帧；解码失败的帧按协议约定静默丢弃。

mod addr;
mod codec;
mod packet;

pub use addr::EndpointAddr;
pub use codec::{HEADER_LEN, WireError, decode, encode};
pub use packet::Packet;
