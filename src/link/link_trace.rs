//! Trace hooks for the link and the endpoints riding on it.

use crate::sim::SimTime;
use crate::trace::{TraceEvent, TraceEventKind};
use crate::wire::{EndpointAddr, Packet, WireError};

use super::channel::LossyLink;
use super::faults::FaultConfig;
use crate::proto::TransferConfig;

impl LossyLink {
    fn trace_push(&mut self, t: SimTime, kind: TraceEventKind) {
        if let Some(tr) = &mut self.trace {
            tr.push(TraceEvent { t_ns: t.0, kind });
        }
    }

    /// 记录运行元信息（约定在仿真开始前调用，作为第一条事件）。
    pub fn emit_trace_meta(&mut self, cfg: &TransferConfig, faults: &FaultConfig, latency: SimTime) {
        if self.trace.is_none() {
            return;
        }
        let kind = TraceEventKind::Meta {
            mss: cfg.mss as u64,
            window: cfg.window_size,
            timeout_ns: cfg.retrans_timeout.0,
            tick_ns: cfg.tick_interval.0,
            latency_ns: latency.0,
            jitter_ns: faults.jitter.0,
            loss: faults.loss,
            dup: faults.dup,
            scope: faults.scope.to_string(),
            seed: faults.seed,
        };
        self.trace_push(SimTime::ZERO, kind);
    }

    pub(crate) fn trace_link_send(&mut self, t: SimTime, pkt: &Packet, frame_len: usize) {
        let kind = TraceEventKind::LinkSend {
            from: pkt.src.to_string(),
            to: pkt.dst.to_string(),
            seq: pkt.seq,
            ack: pkt.ack,
            syn: pkt.syn,
            ack_flag: pkt.ack_flag,
            fin: pkt.fin,
            payload_len: pkt.payload_len() as u64,
            frame_len: frame_len as u64,
        };
        self.trace_push(t, kind);
    }

    pub(crate) fn trace_link_drop(&mut self, t: SimTime, pkt: &Packet, forced: bool) {
        let kind = TraceEventKind::LinkDrop {
            from: pkt.src.to_string(),
            seq: pkt.seq,
            forced,
        };
        self.trace_push(t, kind);
    }

    pub(crate) fn trace_link_duplicate(&mut self, t: SimTime, pkt: &Packet) {
        let kind = TraceEventKind::LinkDuplicate {
            from: pkt.src.to_string(),
            seq: pkt.seq,
        };
        self.trace_push(t, kind);
    }

    pub(crate) fn trace_link_deliver(&mut self, t: SimTime, pkt: &Packet) {
        let kind = TraceEventKind::LinkDeliver {
            to: pkt.dst.to_string(),
            seq: pkt.seq,
        };
        self.trace_push(t, kind);
    }

    pub(crate) fn trace_link_decode_error(&mut self, t: SimTime, to: EndpointAddr, err: &WireError) {
        let kind = TraceEventKind::LinkDecodeError {
            to: to.to_string(),
            error: err.to_string(),
        };
        self.trace_push(t, kind);
    }

    // 协议层事件由端点经由链路引用记录，与链路事件共用一条时间轴。

    pub(crate) fn trace_send_data(&mut self, t: SimTime, seq: u64, len: usize, retrans: bool) {
        self.trace_push(
            t,
            TraceEventKind::SendData {
                seq,
                len: len as u64,
                retrans,
            },
        );
    }

    pub(crate) fn trace_send_ack(&mut self, t: SimTime, ack: u64) {
        self.trace_push(t, TraceEventKind::SendAck { ack });
    }

    pub(crate) fn trace_recv_ack(&mut self, t: SimTime, ack: u64, outcome: &'static str) {
        self.trace_push(
            t,
            TraceEventKind::RecvAck {
                ack,
                outcome: outcome.to_string(),
            },
        );
    }

    pub(crate) fn trace_state_change(
        &mut self,
        t: SimTime,
        addr: EndpointAddr,
        from: &'static str,
        to: &'static str,
    ) {
        self.trace_push(
            t,
            TraceEventKind::StateChange {
                addr: addr.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            },
        );
    }

    pub(crate) fn trace_deliver(&mut self, t: SimTime, seq: u64, len: usize) {
        self.trace_push(
            t,
            TraceEventKind::Deliver {
                seq,
                len: len as u64,
            },
        );
    }
}
