//! Report rendering
//! 报告输出

use std::io::Write;

use chrono::{DateTime, Local};
use lvmts_base::{PER_LINE, Sec};
use lvmts_heat::ExtentTable;
use lvmts_map::PvLoc;

/// asctime layout / asctime 格式
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// One report pass, physical locations in descending score order
/// 一次报告，物理位置按分数降序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
  /// Wall-clock seconds the scores were computed at / 计算分数时的时间
  pub at: Sec,
  /// Requested extents per ranking / 每个排名请求的区段数
  pub top: usize,
  pub combined: Vec<PvLoc>,
  pub read: Vec<PvLoc>,
  pub write: Vec<PvLoc>,
}

impl Report {
  pub fn render(&self, w: &mut impl Write) -> std::io::Result<()> {
    let at = i64::try_from(self.at)
      .ok()
      .and_then(|s| DateTime::from_timestamp(s, 0))
      .map(|t| t.with_timezone(&Local).format(ASCTIME).to_string())
      .unwrap_or_default();
    let top = self.top;

    write!(w, "\n\n{at}\n")?;
    writeln!(w, "{top} most active physical extents: (from most to least)")?;
    segs(w, &self.combined)?;
    write!(w, "\n\n")?;

    writeln!(w, "{top} most read extents (from most to least):")?;
    segs(w, &self.read)?;
    write!(w, "\n\n")?;

    writeln!(w, "{top} most write extents (from most to least):")?;
    segs(w, &self.write)?;
    w.flush()
  }
}

/// Colon separated starting segments, PER_LINE per line
/// 以冒号分隔的起始段，每行 PER_LINE 个
fn segs(w: &mut impl Write, locs: &[PvLoc]) -> std::io::Result<()> {
  for (i, loc) in locs.iter().enumerate() {
    if i % PER_LINE == PER_LINE - 1 {
      writeln!(w, "{}", loc.pe)?;
    } else {
      write!(w, "{}:", loc.pe)?;
    }
  }
  Ok(())
}

/// Scores of every touched extent, in extent order
/// 按区段顺序输出所有被访问区段的分数
pub fn dump(w: &mut impl Write, table: &ExtentTable, now: Sec) -> std::io::Result<()> {
  writeln!(w, "individual extent score:")?;
  for (le, h) in table.iter().filter(|(_, h)| !h.is_empty()) {
    let s = h.scores(le, now);
    writeln!(w, "{le}: r: {}, w:{}", s.read, s.write)?;
  }
  w.flush()
}
