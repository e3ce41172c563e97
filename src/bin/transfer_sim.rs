//! A→B 可靠文件传输仿真
//!
//! 在带丢包/复制/抖动的不可靠链路上运行一次完整传输（建连、选择重传、
//! 挥手），校验接收字节与源逐字节一致，输出一行机器可解析的统计。

use arqsim_rs::driver::{TransferWorld, start_ticks};
use arqsim_rs::link::{FaultConfig, FaultScope, LossyLink};
use arqsim_rs::proto::{MemSink, MemSource, ReceiverEndpoint, SenderEndpoint, TransferConfig};
use arqsim_rs::sim::{SimTime, Simulator};
use arqsim_rs::trace::TraceLogger;
use clap::Parser;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "transfer-sim",
    about = "不可靠链路上的 A→B 可靠传输仿真（选择重传）"
)]
struct Args {
    /// 随机生成的载荷大小（字节）；给定 --input 时忽略
    #[arg(long, default_value_t = 100_000)]
    bytes: u64,

    /// 从文件读取载荷
    #[arg(long)]
    input: Option<PathBuf>,

    /// 把接收到的字节写入此文件
    #[arg(long)]
    output: Option<PathBuf>,

    /// MSS（每个数据段载荷大小，字节）
    #[arg(long, default_value_t = 1000)]
    mss: usize,

    /// 发送窗口大小（段数）
    #[arg(long, default_value_t = 20)]
    window: u64,

    /// 重传超时（ms，固定间隔）
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// 端点 tick 周期（ms）
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// 单向传播时延（ms）
    #[arg(long, default_value_t = 50)]
    latency_ms: u64,

    /// 投递抖动上限（ms，均匀分布，引入乱序）
    #[arg(long, default_value_t = 0)]
    jitter_ms: u64,

    /// 丢包概率 [0,1]
    #[arg(long, default_value_t = 0.0)]
    loss: f64,

    /// 复制概率 [0,1]
    #[arg(long, default_value_t = 0.0)]
    dup: f64,

    /// 故障范围：data_plane（仅数据段与其 ACK，任意丢包率都能收敛）
    /// 或 all（含一次性的 SYN/FIN，高丢包率下可能不终止）
    #[arg(long, default_value = "data_plane")]
    fault_scope: String,

    /// 故障与载荷生成的 RNG 种子
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// 输出 trace JSON 文件
    #[arg(long)]
    trace_json: Option<PathBuf>,

    /// 最多仿真到此时刻（ms）；默认运行到事件排空
    #[arg(long)]
    until_ms: Option<u64>,
}

fn parse_scope(raw: &str) -> FaultScope {
    match raw {
        "all" => FaultScope::All,
        _ => FaultScope::DataPlane,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let payload = match &args.input {
        Some(path) => fs::read(path).expect("read input file"),
        None => {
            let mut data = vec![0u8; args.bytes as usize];
            StdRng::seed_from_u64(args.seed).fill_bytes(&mut data);
            data
        }
    };

    let cfg = TransferConfig {
        mss: args.mss,
        window_size: args.window,
        retrans_timeout: SimTime::from_millis(args.timeout_ms),
        tick_interval: SimTime::from_millis(args.tick_ms),
    };
    let faults = FaultConfig {
        seed: args.seed,
        loss: args.loss,
        dup: args.dup,
        jitter: SimTime::from_millis(args.jitter_ms),
        scope: parse_scope(&args.fault_scope),
        ..FaultConfig::default()
    };
    let latency = SimTime::from_millis(args.latency_ms);

    let mut link = LossyLink::new(latency, faults.clone());
    if args.trace_json.is_some() {
        link.trace = Some(TraceLogger::default());
        link.emit_trace_meta(&cfg, &faults, latency);
    }

    let sender = SenderEndpoint::new(cfg.clone(), Box::new(MemSource::new(payload.clone())));
    let sink = MemSink::new();
    let received = sink.handle();
    let receiver = ReceiverEndpoint::new(Box::new(sink));

    let mut sim = Simulator::default();
    let mut world = TransferWorld::new(link, sender, receiver);
    start_ticks(&mut sim, cfg.tick_interval);

    if let Some(until_ms) = args.until_ms {
        sim.run_until(SimTime::from_millis(until_ms), &mut world);
    } else {
        sim.run(&mut world);
    }

    let received = received.lock().expect("sink handle lock");
    let result = if !world.is_finished() {
        "INCOMPLETE"
    } else if *received == payload {
        "SUCCESS"
    } else {
        "CORRUPT"
    };

    let sender_stats = world.sender.stats();
    let link_stats = &world.link.stats;
    println!(
        "transfer_done result={} bytes={} delivered_bytes={} elapsed_ms={} segments_sent={} retransmissions={} acks_received={} link_sent_pkts={} link_dropped={} link_duplicated={} total_bytes_sent={}",
        result,
        payload.len(),
        received.len(),
        sim.now().as_millis(),
        sender_stats.segments_sent,
        sender_stats.retransmissions,
        sender_stats.acks_received,
        link_stats.sent_pkts,
        link_stats.dropped_pkts,
        link_stats.duplicated_pkts,
        link_stats.sent_bytes,
    );

    if let Some(path) = &args.output {
        fs::write(path, &*received).expect("write output file");
    }

    if let Some(path) = &args.trace_json {
        if let Some(tr) = world.link.trace.take() {
            let json = serde_json::to_string_pretty(&tr.events).expect("serialize trace events");
            fs::write(path, json).expect("write trace json");
            eprintln!("wrote trace events to {}", path.display());
        }
    }

    if result != "SUCCESS" {
        std::process::exit(1);
    }
}
