//! Per-extent access history
//! 区段访问历史
//!
//! Each lane is a ring of the most recent bucket starts, newest first.
//! Slots are front-packed: once a slot is 0, every later slot is 0.
//! 每条通道保存最近的时间桶起点，新的在前，且从头部连续填充。

use std::fmt;

use lvmts_base::{GRANULARITY, HISTORY_LEN, Lane, Sec};

/// Timestamps of one lane, most recent first
/// 单条通道的时间戳，最近的在前
pub type Slots = [Sec; HISTORY_LEN];

/// Read and write history of one logical extent
/// 单个逻辑区段的读写历史
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtentHistory {
  pub reads: Slots,
  pub writes: Slots,
}

impl ExtentHistory {
  #[inline]
  pub fn lane(&self, lane: Lane) -> &Slots {
    match lane {
      Lane::Read => &self.reads,
      Lane::Write => &self.writes,
    }
  }

  #[inline]
  fn lane_mut(&mut self, lane: Lane) -> &mut Slots {
    match lane {
      Lane::Read => &mut self.reads,
      Lane::Write => &mut self.writes,
    }
  }

  /// Record an access at `ts`, returns true if a new bucket was opened
  /// 记录一次访问，开启新时间桶时返回 true
  ///
  /// An access within GRANULARITY of the front entry is absorbed into that
  /// bucket and the front keeps its original timestamp.
  /// 与头部相距不超过 GRANULARITY 的访问并入该桶，头部时间戳不更新。
  pub fn record(&mut self, lane: Lane, ts: Sec) -> bool {
    let slots = self.lane_mut(lane);
    // Older or equal timestamps saturate to 0 and never shift
    // 更早或相等的时间戳差值饱和为 0，不会移位
    if ts.saturating_sub(slots[0]) > GRANULARITY {
      slots.copy_within(..HISTORY_LEN - 1, 1);
      slots[0] = ts;
      true
    } else {
      false
    }
  }

  /// Never touched on either lane
  /// 两条通道均未被访问
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.reads[0] == 0 && self.writes[0] == 0
  }
}

impl fmt::Display for ExtentHistory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (r, w) in self.reads.iter().zip(&self.writes) {
      if *r != 0 {
        write!(f, "r: {r}, ")?;
      }
      if *w != 0 {
        write!(f, "w: {w}, ")?;
      }
    }
    Ok(())
  }
}
