//! blkparse record
//! blkparse 记录
//!
//! Layout: dev cpu seq time pid action rwbs sector + len [err]
//! 布局：设备 CPU 序号 时间 进程 动作 RWBS 扇区 + 长度 [错误]

use lvmts_base::Lane;

// Field positions / 字段位置
const F_TIME: usize = 3;
const F_ACTION: usize = 5;
const F_RWBS: usize = 6;
const F_SECTOR: usize = 7;
const F_PLUS: usize = 8;
const F_LEN: usize = 9;

/// Trace action
/// 跟踪动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// `C`, request completed / 请求完成
  Complete,
  /// Queued, issued, merged, ... / 排队、下发、合并等
  Other,
}

impl Action {
  #[inline]
  pub fn parse(code: &str) -> Self {
    if code == "C" {
      Self::Complete
    } else {
      Self::Other
    }
  }
}

/// One parsed trace line
/// 一行解析后的跟踪记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
  /// Seconds since trace start / 自跟踪开始的秒数
  pub time: f64,
  pub action: Action,
  /// None when RWBS starts with neither R nor W / RWBS 首字符非 R/W 时为 None
  pub lane: Option<Lane>,
  /// Device sector offset / 设备扇区偏移
  pub sector: u64,
  /// Length in sectors when present / 扇区长度（若存在）
  pub len: Option<u32>,
}

impl Record {
  /// Parse one line, None if any required field is absent or invalid
  /// 解析一行，必需字段缺失或无效时返回 None
  pub fn parse(line: &str) -> Option<Self> {
    let mut f = [""; F_LEN + 1];
    let mut n = 0;
    for (slot, tok) in f.iter_mut().zip(line.split_ascii_whitespace()) {
      *slot = tok;
      n += 1;
    }
    if n <= F_SECTOR {
      return None;
    }

    let time: f64 = f[F_TIME].parse().ok()?;
    if !time.is_finite() || time < 0.0 {
      return None;
    }
    let sector = f[F_SECTOR].parse().ok()?;
    let len = if f[F_PLUS] == "+" {
      f[F_LEN].parse().ok()
    } else {
      None
    };

    Some(Self {
      time,
      action: Action::parse(f[F_ACTION]),
      lane: Lane::from_rwbs(f[F_RWBS]),
      sector,
      len,
    })
  }

  /// Whole seconds since trace start
  /// 自跟踪开始的整秒数
  #[inline]
  pub fn secs(&self) -> u64 {
    self.time as u64
  }
}
