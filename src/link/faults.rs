//! 链路故障模型
//!
//! 概率性故障（丢包/复制/抖动）由种子化 RNG 驱动，同一配置可复现同一调度；
//! 脚本化故障按方向上的发送序号强制丢弃，用于构造精确场景。

use crate::sim::SimTime;

/// 故障作用范围。
///
/// SYN/FIN 在本协议中只发送一次，没有重传兜底；`DataPlane` 只对可恢复的
/// 数据段与 B→A 的选择 ACK 注入故障，任意丢包率下传输仍能收敛。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultScope {
    /// 所有帧一视同仁
    #[default]
    All,
    /// 仅数据段与其选择 ACK
    DataPlane,
}

impl std::fmt::Display for FaultScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultScope::All => write!(f, "all"),
            FaultScope::DataPlane => write!(f, "data_plane"),
        }
    }
}

/// 链路故障配置。
#[derive(Debug, Clone)]
pub struct FaultConfig {
    /// RNG 种子
    pub seed: u64,
    /// 每个合规帧的丢弃概率 [0, 1]
    pub loss: f64,
    /// 每个合规帧的复制概率 [0, 1]
    pub dup: f64,
    /// 投递时延抖动上限（均匀分布，叠加在固定时延上）
    pub jitter: SimTime,
    /// 概率性故障的作用范围
    pub scope: FaultScope,
    /// 强制丢弃：A→B 方向上的发送序号（从 0 计）
    pub drop_a_to_b: Vec<u64>,
    /// 强制丢弃：B→A 方向上的发送序号
    pub drop_b_to_a: Vec<u64>,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            loss: 0.0,
            dup: 0.0,
            jitter: SimTime::ZERO,
            scope: FaultScope::default(),
            drop_a_to_b: Vec::new(),
            drop_b_to_a: Vec::new(),
        }
    }
}
