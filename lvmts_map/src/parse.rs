//! LVM report output parsing
//! LVM 报告输出解析

use hipstr::HipStr;
use lvmts_base::Le;

use crate::{Error, Result};

/// Field separator passed to `lvs --separator`
/// 传给 `lvs --separator` 的字段分隔符
pub const SEP: char = ';';

/// One LV segment mapped onto a physical volume
/// 映射到物理卷上的一个 LV 段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seg {
  /// First logical extent / 起始逻辑区段
  pub le: Le,
  /// Length in extents / 长度（区段数）
  pub len: u64,
  pub pv: HipStr<'static>,
  /// First physical extent on `pv` / `pv` 上的起始物理区段
  pub pe: u64,
}

impl Seg {
  #[inline]
  pub fn contains(&self, le: Le) -> bool {
    le >= self.le && le - self.le < self.len
  }
}

/// `vgs -o vg_extent_size --units s --nosuffix` output, 0 when empty
/// 解析卷组区段大小（扇区），输出为空时返回 0
pub fn extent_size(out: &str) -> Result<u64> {
  let Some(line) = out.lines().map(str::trim).find(|l| !l.is_empty()) else {
    return Ok(0);
  };
  if let Ok(n) = line.parse::<u64>() {
    return Ok(n);
  }
  // Some LVM versions print "8192.00"
  // 部分 LVM 版本输出 "8192.00"
  match line.parse::<f64>() {
    Ok(f) if f.is_finite() && f >= 0.0 => Ok(f as u64),
    _ => Err(Error::Parse {
      what: "extent size",
      line: line.into(),
    }),
  }
}

/// `lvs --segments -o seg_start_pe,seg_size_pe,seg_pe_ranges` output
/// 解析 LV 段表
///
/// A range looks like `/dev/sdb:0-2559`. Striped or mirrored segments list
/// several ranges; only the first one is kept.
/// 条带或镜像段包含多个范围，只取第一个。
pub fn segments(out: &str) -> Result<Vec<Seg>> {
  let mut segs = Vec::new();
  for line in out.lines().map(str::trim).filter(|l| !l.is_empty()) {
    let err = || Error::Parse {
      what: "segment",
      line: line.into(),
    };
    let mut f = line.split(SEP).map(str::trim);
    let le = f.next().and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let len = f.next().and_then(|s| s.parse().ok()).ok_or_else(err)?;
    let ranges = f.next().ok_or_else(err)?;
    // Segments without PV backing (e.g. thin, zero) have no range
    // 无 PV 支撑的段（如 thin、zero）没有范围
    let Some(first) = ranges.split_ascii_whitespace().next() else {
      continue;
    };
    let (pv, span) = first.rsplit_once(':').ok_or_else(err)?;
    let start = span
      .split_once('-')
      .map_or(span, |(a, _)| a)
      .parse()
      .map_err(|_| err())?;
    segs.push(Seg {
      le,
      len,
      pv: HipStr::from(pv.to_owned()),
      pe: start,
    });
  }
  segs.sort_unstable_by_key(|s| s.le);
  Ok(segs)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extent_size_int() {
    assert_eq!(extent_size("  8192\n").unwrap(), 8192);
  }

  #[test]
  fn extent_size_float() {
    assert_eq!(extent_size("  8192.00\n").unwrap(), 8192);
  }

  #[test]
  fn extent_size_empty() {
    assert_eq!(extent_size("\n  \n").unwrap(), 0);
  }

  #[test]
  fn extent_size_bad() {
    assert!(extent_size("  8M\n").is_err());
  }

  #[test]
  fn segments_linear() {
    let segs = segments("  2560;1280;/dev/sdc:0-1279\n  0;2560;/dev/sdb:100-2659\n").unwrap();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].le, 0);
    assert_eq!(segs[0].pv.as_str(), "/dev/sdb");
    assert_eq!(segs[0].pe, 100);
    assert!(segs[0].contains(2559));
    assert!(!segs[0].contains(2560));
    assert_eq!(segs[1].pv.as_str(), "/dev/sdc");
  }

  #[test]
  fn segments_striped() {
    let segs = segments("0;200;/dev/sdb:0-99 /dev/sdc:0-99\n").unwrap();
    assert_eq!(segs[0].pv.as_str(), "/dev/sdb");
    assert_eq!(segs[0].len, 200);
  }

  #[test]
  fn segments_unbacked() {
    let segs = segments("0;10;\n").unwrap();
    assert!(segs.is_empty());
  }

  #[test]
  fn segments_bad() {
    assert!(segments("x;10;/dev/sdb:0-9\n").is_err());
    assert!(segments("0;10;/dev/sdb\n").is_err());
  }
}
