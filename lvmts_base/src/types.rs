//! Core types 核心类型

/// Logical extent index (zero-based within the LV)
/// 逻辑区段索引（LV 内从 0 开始）
pub type Le = u64;

/// Absolute wall-clock seconds since epoch
/// 自纪元起的绝对秒数
pub type Sec = u64;

/// I/O direction lane
/// I/O 方向通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
  Read,
  Write,
}

impl Lane {
  /// Lane from blktrace RWBS flags, by first character only
  /// 根据 blktrace RWBS 标志的首字符确定通道
  #[inline]
  pub fn from_rwbs(rwbs: &str) -> Option<Self> {
    match rwbs.as_bytes().first() {
      Some(b'R') => Some(Self::Read),
      Some(b'W') => Some(Self::Write),
      _ => None,
    }
  }
}

/// Current wall-clock seconds (fast, ~10ns) 当前秒级时间戳（快速，约10ns）
#[inline]
pub fn now_sec() -> Sec {
  coarsetime::Clock::now_since_epoch().as_secs()
}
