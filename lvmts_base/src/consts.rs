//! 全局常量 Global constants

/// Timestamps kept per lane
/// 每条通道保留的时间戳数
pub const HISTORY_LEN: usize = 20;

/// Bucket width in seconds (5 minutes)
/// 时间桶宽度（秒，5 分钟）
pub const GRANULARITY: u64 = 300;

/// Score ceiling
/// 分数上限
pub const BASE: u32 = 1 << 30;

/// Penalty for each empty history slot
/// 每个空历史槽位的扣分
pub const EMPTY_PENALTY: u32 = BASE / HISTORY_LEN as u32;

/// Trailing entries added past the highest index on growth
/// 扩容时在最大索引之后追加的条目数
pub const SLACK: usize = 100;

/// Initial extent table size
/// 区段表初始大小
pub const INIT_EXTENTS: usize = 1024;

/// Default number of extents per ranking
/// 每个排名默认输出的区段数
pub const DEFAULT_TOP: usize = 200;

/// Stream seconds between reports
/// 两次报告之间的流时间（秒）
pub const REPORT_EVERY: u64 = 60 * 5;

/// Segments printed per report line
/// 报告每行输出的段数
pub const PER_LINE: usize = 10;
