//! Dense extent table indexed by logical extent
//! 按逻辑区段索引的稠密区段表

use lvmts_base::{Le, Lane, Sec};
use log::debug;

use crate::{Error, ExtentHistory, ExtentScore, Result};

/// Outcome of [`ExtentTable::record`]
/// [`ExtentTable::record`] 的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recorded {
  /// Table was extended to hold the index / 为容纳索引而扩容
  pub grew: bool,
  /// A new bucket was opened on the lane / 通道开启了新时间桶
  pub opened: bool,
}

/// Growable table of extent histories, indices are stable
/// 可增长的区段历史表，索引稳定不变
#[derive(Debug, Clone)]
pub struct ExtentTable {
  items: Vec<ExtentHistory>,
  slack: usize,
}

impl ExtentTable {
  /// Create table with `init` zeroed entries, growth adds `slack` past the index
  /// 创建含 `init` 个空条目的表，扩容时在索引后追加 `slack` 个
  pub fn new(init: usize, slack: usize) -> Result<Self> {
    let mut items = Vec::new();
    items
      .try_reserve_exact(init)
      .map_err(|_| Error::Oom { want: init })?;
    items.resize(init, ExtentHistory::default());
    Ok(Self { items, slack })
  }

  /// Make `le` addressable, returns true if the table grew
  /// 确保 `le` 可寻址，发生扩容时返回 true
  pub fn ensure_capacity(&mut self, le: Le) -> Result<bool> {
    let idx = usize::try_from(le).map_err(|_| Error::Index(le))?;
    let len = self.items.len();
    if idx < len {
      return Ok(false);
    }
    let want = idx.checked_add(self.slack).ok_or(Error::Index(le))?;
    self
      .items
      .try_reserve_exact(want - len)
      .map_err(|_| Error::Oom { want })?;
    self.items.resize(want, ExtentHistory::default());
    debug!("extent table {len} -> {want}");
    Ok(true)
  }

  /// Grow if needed then record the access
  /// 按需扩容后记录访问
  pub fn record(&mut self, le: Le, lane: Lane, ts: Sec) -> Result<Recorded> {
    let grew = self.ensure_capacity(le)?;
    // ensure_capacity guarantees le < len
    let opened = self.items[le as usize].record(lane, ts);
    Ok(Recorded { grew, opened })
  }

  #[inline]
  pub fn get(&self, le: Le) -> Option<&ExtentHistory> {
    usize::try_from(le).ok().and_then(|i| self.items.get(i))
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Iterate (le, history) in index order
  /// 按索引顺序迭代 (le, history)
  pub fn iter(&self) -> impl Iterator<Item = (Le, &ExtentHistory)> {
    self.items.iter().enumerate().map(|(i, h)| (i as Le, h))
  }

  /// Fresh scores of every extent against `now`
  /// 按 `now` 计算所有区段的最新分数
  pub fn scores(&self, now: Sec) -> Vec<ExtentScore> {
    self.iter().map(|(le, h)| h.scores(le, now)).collect()
  }
}
