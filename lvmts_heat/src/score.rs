//! Decay scoring
//! 衰减评分

use lvmts_base::{BASE, EMPTY_PENALTY, GRANULARITY, Le, Lane, Sec};

use crate::{ExtentHistory, Slots};

/// Score one lane against `now`
/// 按 `now` 计算单条通道的分数
///
/// Starts at BASE, each empty slot costs BASE / HISTORY_LEN and each filled
/// slot costs its age in buckets. Saturates at 0, so a stale lane can never
/// wrap around and outrank a fresh one. Timestamps ahead of `now` cost 0.
/// 从 BASE 开始，空槽位扣 BASE / HISTORY_LEN，已填槽位扣其桶龄。
/// 结果在 0 处饱和，过旧的通道不会回绕成高分。
pub fn score(slots: &Slots, now: Sec) -> u32 {
  if slots[0] == 0 {
    return 0;
  }
  slots.iter().fold(BASE, |acc, &ts| {
    let cost = if ts == 0 {
      EMPTY_PENALTY
    } else {
      u32::try_from(now.saturating_sub(ts) / GRANULARITY).unwrap_or(u32::MAX)
    };
    acc.saturating_sub(cost)
  })
}

/// Scores of one extent, recomputed for every report
/// 单个区段的分数，每次报告重新计算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtentScore {
  pub le: Le,
  pub read: u32,
  pub write: u32,
}

impl ExtentScore {
  #[inline]
  pub fn combined(&self) -> u64 {
    u64::from(self.read) + u64::from(self.write)
  }
}

impl ExtentHistory {
  /// Score both lanes
  /// 计算两条通道的分数
  #[inline]
  pub fn scores(&self, le: Le, now: Sec) -> ExtentScore {
    ExtentScore {
      le,
      read: score(self.lane(Lane::Read), now),
      write: score(self.lane(Lane::Write), now),
    }
  }
}
