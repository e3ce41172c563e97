use serde::{Deserialize, Serialize};

/// 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 运行元信息（约定作为 t=0 的第一条事件）
    Meta {
        mss: u64,
        window: u64,
        timeout_ns: u64,
        tick_ns: u64,
        latency_ns: u64,
        jitter_ns: u64,
        loss: f64,
        dup: f64,
        scope: String,
        seed: u64,
    },
    /// 链路接受一个待发送的帧
    LinkSend {
        from: String,
        to: String,
        seq: u64,
        ack: u64,
        syn: bool,
        ack_flag: bool,
        fin: bool,
        payload_len: u64,
        frame_len: u64,
    },
    /// 链路丢弃帧（forced = 脚本强制丢弃，否则为概率丢包）
    LinkDrop { from: String, seq: u64, forced: bool },
    /// 链路复制帧（两份独立投递）
    LinkDuplicate { from: String, seq: u64 },
    /// 帧到达对端收件箱
    LinkDeliver { to: String, seq: u64 },
    /// 帧解码失败，静默丢弃
    LinkDecodeError { to: String, error: String },
    /// 发送端：发出数据段（retrans 标记超时重传）
    SendData { seq: u64, len: u64, retrans: bool },
    /// 接收端：发出针对单个数据段的选择 ACK
    SendAck { ack: u64 },
    /// 发送端：收到 ACK（outcome 标记新确认/重复/未知）
    RecvAck { ack: u64, outcome: String },
    /// 端点生命周期状态迁移
    StateChange {
        addr: String,
        from: String,
        to: String,
    },
    /// 接收端：按序交付一段载荷到输出
    Deliver { seq: u64, len: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 事件时间（ns）
    pub t_ns: u64,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// 事件记录器：按发生顺序追加。
#[derive(Debug, Default)]
pub struct TraceLogger {
    pub events: Vec<TraceEvent>,
}

impl TraceLogger {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
