//! Ranking by score
//! 按分数排名

use crate::ExtentScore;

/// Sort key
/// 排序键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  /// read + write
  Combined,
  Read,
  Write,
}

impl Key {
  #[inline]
  pub fn of(self, s: &ExtentScore) -> u64 {
    match self {
      Self::Combined => s.combined(),
      Self::Read => u64::from(s.read),
      Self::Write => u64::from(s.write),
    }
  }
}

/// Sort descending by key, order among ties is unspecified
/// 按键降序排序，相同分数的顺序不确定
#[inline]
pub fn rank(scores: &mut [ExtentScore], key: Key) {
  scores.sort_unstable_by(|a, b| key.of(b).cmp(&key.of(a)));
}

/// First `k` entries of a ranked slice, stopping at the first zero score
/// 已排序切片的前 `k` 项，遇到 0 分即停止
#[inline]
pub fn top(ranked: &[ExtentScore], key: Key, k: usize) -> &[ExtentScore] {
  let n = ranked
    .iter()
    .take(k)
    .position(|s| key.of(s) == 0)
    .unwrap_or(k.min(ranked.len()));
  &ranked[..n]
}

/// The three orderings of one report pass, each cut at the first zero score
/// 单次报告的三个排名，各自在首个 0 分处截断
///
/// Entries past K are kept so a caller that drops some of them (failed
/// lookups) can still fill K from the remainder.
/// 保留 K 之后的条目，调用方跳过部分条目（如查询失败）时仍可补足 K 个。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
  pub combined: Vec<ExtentScore>,
  pub read: Vec<ExtentScore>,
  pub write: Vec<ExtentScore>,
}

impl Ranking {
  /// Rank `scores` in place three times and keep the nonzero prefix of each
  /// 对 `scores` 原地排序三次，各保留非零前缀
  pub fn new(mut scores: Vec<ExtentScore>) -> Self {
    let n = scores.len();
    let mut pick = |key| {
      rank(&mut scores, key);
      top(&scores, key, n).to_vec()
    };
    let combined = pick(Key::Combined);
    let read = pick(Key::Read);
    let write = pick(Key::Write);
    Self {
      combined,
      read,
      write,
    }
  }

  #[inline]
  pub fn get(&self, key: Key) -> &[ExtentScore] {
    match key {
      Key::Combined => &self.combined,
      Key::Read => &self.read,
      Key::Write => &self.write,
    }
  }
}
