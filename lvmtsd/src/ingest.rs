//! Ingestion loop
//! 采集主循环
//!
//! START → STREAMING ⇄ REPORTING → DONE
//!
//! Records are consumed one at a time. A report is produced whenever the
//! stream clock passes the previous report by more than `report_every`
//! seconds, and once more at end of input.
//! 逐条消费记录。流时间距上次报告超过 `report_every` 秒时输出报告，输入结束时再输出一次。

use std::io::Write;

use log::{debug, info, warn};
use lvmts_base::{Le, Sec, now_sec};
use lvmts_heat::{ExtentScore, ExtentTable, Key, Ranking};
use lvmts_map::{ExtentMap, PvLoc};
use lvmts_trace::{Action, Record, RecordSource};

use crate::{Conf, Error, Report, Result, report};

/// Loop state
/// 循环状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Start,
  Streaming,
  Reporting,
  Done,
}

/// Counters for one run
/// 单次运行的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
  /// Records recorded into the table / 写入表的记录数
  pub applied: u64,
  /// Non-completion or non read/write records / 非完成或非读写记录数
  pub ignored: u64,
  /// Malformed lines dropped by the source / 记录源丢弃的格式错误行数
  pub skipped: u64,
  /// Table growth events / 扩容次数
  pub grown: u64,
  pub reports: u64,
}

/// Logical extent holding `sector`, rounded up
/// `sector` 所在的逻辑区段（向上取整）
#[inline]
pub fn extent_index(sector: u64, sectors_per_extent: u64) -> Le {
  sector.div_ceil(sectors_per_extent)
}

/// Extent heat tracker for one logical volume
/// 单个逻辑卷的区段热度跟踪器
pub struct Ingest<'a, M: ExtentMap> {
  conf: &'a Conf,
  map: M,
  table: ExtentTable,
  /// Wall-clock seconds at trace start / 跟踪开始时的时间
  start: Sec,
  sectors: u64,
  /// Stream seconds of the previous report / 上次报告的流时间
  last: u64,
  clock: fn() -> Sec,
  stats: Stats,
  state: State,
}

impl<'a, M: ExtentMap> Ingest<'a, M> {
  /// Resolve the extent size and allocate the table
  /// 查询区段大小并分配区段表
  pub fn new(conf: &'a Conf, mut map: M, start: Sec) -> Result<Self> {
    let sectors = map.sectors_per_extent(&conf.vg)?;
    if sectors == 0 {
      return Err(Error::VgNotFound(conf.vg.clone()));
    }
    let table = ExtentTable::new(conf.init_extents, conf.slack)?;
    info!(
      "tracking {}/{}: {sectors} sectors per extent",
      conf.vg, conf.lv
    );
    Ok(Self {
      conf,
      map,
      table,
      start,
      sectors,
      last: 0,
      clock: now_sec,
      stats: Stats::default(),
      state: State::Start,
    })
  }

  /// Replace the wall clock used for scoring
  /// 替换评分使用的时钟
  pub fn with_clock(mut self, clock: fn() -> Sec) -> Self {
    self.clock = clock;
    self
  }

  #[inline]
  pub fn state(&self) -> State {
    self.state
  }

  #[inline]
  pub fn stats(&self) -> Stats {
    self.stats
  }

  #[inline]
  pub fn table(&self) -> &ExtentTable {
    &self.table
  }

  #[inline]
  pub fn sectors_per_extent(&self) -> u64 {
    self.sectors
  }

  /// Consume one record, may emit a report to `out`
  /// 消费一条记录，可能向 `out` 输出报告
  pub fn feed(&mut self, rec: &Record, out: &mut impl Write) -> Result<()> {
    self.state = State::Streaming;
    if rec.action != Action::Complete {
      self.stats.ignored += 1;
      return Ok(());
    }

    if ((self.last + self.conf.report_every) as f64) < rec.time {
      self.report(out)?;
      self.last = rec.secs();
    }

    let Some(lane) = rec.lane else {
      self.stats.ignored += 1;
      return Ok(());
    };

    let le = extent_index(rec.sector, self.sectors);
    let ts = self.start.saturating_add(rec.secs());
    let r = self.table.record(le, lane, ts)?;
    if r.grew {
      self.stats.grown += 1;
    }
    if r.opened {
      debug!("le {le} {lane:?} {ts}");
    }
    self.stats.applied += 1;
    Ok(())
  }

  /// Drain `src` until end of input
  /// 读取 `src` 直到输入结束
  pub fn run<S: RecordSource>(&mut self, mut src: S, out: &mut impl Write) -> Result<()> {
    self.state = State::Streaming;
    while let Some(rec) = src.next_record()? {
      self.feed(&rec, out)?;
    }
    self.stats.skipped = src.skipped();
    let s = self.stats;
    info!(
      "end of stream: applied {}, ignored {}, skipped {}, reports {}",
      s.applied, s.ignored, s.skipped, s.reports
    );
    Ok(())
  }

  /// Score, rank and print one report
  /// 评分、排名并输出一次报告
  pub fn report(&mut self, out: &mut impl Write) -> Result<Report> {
    let prev = self.state;
    self.state = State::Reporting;
    let now = (self.clock)();
    if let Err(e) = self.map.refresh() {
      warn!("mapper refresh: {e}");
    }

    let ranking = Ranking::new(self.table.scores(now));
    let report = Report {
      at: now,
      top: self.conf.top,
      combined: self.resolve(&ranking, Key::Combined),
      read: self.resolve(&ranking, Key::Read),
      write: self.resolve(&ranking, Key::Write),
    };
    report.render(out)?;

    self.stats.reports += 1;
    info!(
      "report {}: {} extents, {} active",
      self.stats.reports,
      self.table.len(),
      ranking.combined.len()
    );
    self.state = if prev == State::Done {
      State::Done
    } else {
      State::Streaming
    };
    Ok(report)
  }

  /// Map up to `top` ranked extents to physical locations
  /// 将最多 `top` 个排名区段映射为物理位置
  fn resolve(&mut self, ranking: &Ranking, key: Key) -> Vec<PvLoc> {
    locate(&mut self.map, self.conf, ranking.get(key), self.conf.top)
  }

  /// Optional score dump, final report, then release the mapper
  /// 可选的分数转储与最终报告，然后释放映射器
  pub fn finish(mut self, out: &mut impl Write) -> Result<(Report, Stats)> {
    self.state = State::Done;
    if self.conf.dump {
      report::dump(out, &self.table, (self.clock)())?;
    }
    let report = self.report(out)?;
    Ok((report, self.stats))
  }
}

/// Walk `ranked` in order, skip failed lookups, stop after `k` hits
/// 按顺序遍历 `ranked`，跳过查询失败的区段，命中 `k` 个后停止
fn locate<M: ExtentMap>(
  map: &mut M,
  conf: &Conf,
  ranked: &[ExtentScore],
  k: usize,
) -> Vec<PvLoc> {
  let mut locs = Vec::with_capacity(k.min(ranked.len()));
  for s in ranked {
    if locs.len() >= k {
      break;
    }
    match map.logical_to_physical(&conf.vg, &conf.lv, s.le) {
      Ok(loc) => locs.push(loc),
      Err(e) => warn!("skip le {}: {e}", s.le),
    }
  }
  locs
}
