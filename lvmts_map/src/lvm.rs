//! Mapper backed by the LVM command line tools
//! 基于 LVM 命令行工具的映射器

use std::{collections::HashMap, process::Command};

use hipstr::HipStr;
use log::{debug, warn};
use lvmts_base::Le;

use crate::{
  Error, ExtentMap, PvLoc, Result,
  parse::{self, SEP, Seg},
};

/// Runs one LVM report command and returns its stdout
/// 运行一条 LVM 报告命令并返回 stdout
pub trait LvmTool {
  /// Ok(None) when the tool ran but exited non-zero, `err` holds stderr
  /// 工具运行但非零退出时返回 Ok(None)，stderr 写入 `err`
  fn run(&self, args: &[&str], err: &mut String) -> Result<Option<String>>;
}

/// Real `lvm` binary
/// 真实的 `lvm` 可执行文件
#[derive(Debug, Clone, Copy, Default)]
pub struct LvmCli;

impl LvmTool for LvmCli {
  fn run(&self, args: &[&str], err: &mut String) -> Result<Option<String>> {
    let out = Command::new("lvm").args(args).env("LC_ALL", "C").output()?;
    if out.status.success() {
      return Ok(Some(String::from_utf8_lossy(&out.stdout).into_owned()));
    }
    *err = String::from_utf8_lossy(&out.stderr).trim().to_owned();
    debug!("lvm {} -> {}: {err}", args.join(" "), out.status);
    Ok(None)
  }
}

/// Metadata session for one volume group, segment tables cached per LV
/// 单个卷组的元数据会话，按 LV 缓存段表
///
/// A missing LV is cached as `None` until `refresh`.
/// 不存在的 LV 以 `None` 缓存，直到 `refresh`。
pub struct LvmMap<T: LvmTool = LvmCli> {
  tool: T,
  vg: HipStr<'static>,
  sectors: u64,
  segs: HashMap<String, Option<Vec<Seg>>>,
}

impl LvmMap {
  /// Open a session on `vg` using the system `lvm`
  /// 使用系统 `lvm` 打开 `vg` 会话
  pub fn open(vg: &str) -> Result<Self> {
    Self::with_tool(LvmCli, vg)
  }
}

impl<T: LvmTool> LvmMap<T> {
  pub fn with_tool(tool: T, vg: &str) -> Result<Self> {
    let sectors = query_extent_size(&tool, vg)?;
    if sectors == 0 {
      return Err(Error::VgNotFound(HipStr::from(vg.to_owned())));
    }
    debug!("lvm session open: {vg}, {sectors} sectors per extent");
    Ok(Self {
      tool,
      vg: HipStr::from(vg.to_owned()),
      sectors,
      segs: HashMap::new(),
    })
  }

  fn load(&self, vg: &str, lv: &str) -> Result<Vec<Seg>> {
    let target = format!("{vg}/{lv}");
    let sep = SEP.to_string();
    let mut err = String::new();
    let out = self.tool.run(
      &[
        "lvs",
        "--noheadings",
        "--segments",
        "--separator",
        &sep,
        "-o",
        "seg_start_pe,seg_size_pe,seg_pe_ranges",
        &target,
      ],
      &mut err,
    )?;
    let Some(out) = out else {
      warn!("lvs {target}: {err}");
      return Err(lv_not_found(vg, lv));
    };
    let segs = parse::segments(&out)?;
    debug!("{target}: {} segments", segs.len());
    Ok(segs)
  }
}

fn query_extent_size<T: LvmTool>(tool: &T, vg: &str) -> Result<u64> {
  let mut err = String::new();
  let out = tool.run(
    &[
      "vgs",
      "--noheadings",
      "--nosuffix",
      "--units",
      "s",
      "-o",
      "vg_extent_size",
      vg,
    ],
    &mut err,
  )?;
  match out {
    Some(out) => parse::extent_size(&out),
    None => {
      debug!("vgs {vg}: {err}");
      Ok(0)
    }
  }
}

impl<T: LvmTool> ExtentMap for LvmMap<T> {
  fn sectors_per_extent(&mut self, vg: &str) -> Result<u64> {
    if self.vg.as_str() == vg {
      return Ok(self.sectors);
    }
    query_extent_size(&self.tool, vg)
  }

  fn logical_to_physical(&mut self, vg: &str, lv: &str, le: Le) -> Result<PvLoc> {
    // Cache is keyed by LV within this session's VG only
    // 缓存仅对本会话卷组内的 LV 生效
    if self.vg.as_str() != vg {
      return locate(&self.load(vg, lv)?, lv, le);
    }
    if !self.segs.contains_key(lv) {
      let segs = match self.load(vg, lv) {
        Ok(segs) => Some(segs),
        Err(Error::LvNotFound { .. }) => None,
        Err(e) => return Err(e),
      };
      self.segs.insert(lv.to_owned(), segs);
    }
    match self.segs.get(lv) {
      Some(Some(segs)) => locate(segs, lv, le),
      _ => Err(lv_not_found(vg, lv)),
    }
  }

  fn refresh(&mut self) -> Result<()> {
    self.segs.clear();
    Ok(())
  }
}

fn lv_not_found(vg: &str, lv: &str) -> Error {
  Error::LvNotFound {
    vg: HipStr::from(vg.to_owned()),
    lv: HipStr::from(lv.to_owned()),
  }
}

fn locate(segs: &[Seg], lv: &str, le: Le) -> Result<PvLoc> {
  segs
    .iter()
    .find(|s| s.contains(le))
    .map(|s| PvLoc {
      pv: s.pv.clone(),
      pe: s.pe + (le - s.le),
    })
    .ok_or_else(|| Error::NoSegment {
      lv: HipStr::from(lv.to_owned()),
      le,
    })
}

impl<T: LvmTool> Drop for LvmMap<T> {
  fn drop(&mut self) {
    debug!("lvm session closed: {}", self.vg);
  }
}
