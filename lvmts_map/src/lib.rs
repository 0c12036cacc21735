#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lvmts_map - Extent mapping
//! 区段映射
//!
//! Translates (volume group, logical volume, logical extent) into the
//! physical volume and physical extent backing it.
//! 将（卷组、逻辑卷、逻辑区段）转换为其所在的物理卷与物理区段。
//!
//! A mapper value is a metadata session: constructing it opens the session,
//! dropping it releases it.
//! 映射器实例即元数据会话：构造即打开，Drop 即释放。

use hipstr::HipStr;
use lvmts_base::Le;

pub mod error;
mod lvm;
pub mod parse;

pub use error::{Error, Result};
pub use lvm::{LvmCli, LvmMap, LvmTool};

/// Physical location of one logical extent
/// 单个逻辑区段的物理位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvLoc {
  /// Physical volume name / 物理卷名
  pub pv: HipStr<'static>,
  /// Physical extent on `pv` (starting segment) / `pv` 上的物理区段
  pub pe: u64,
}

/// Logical to physical extent lookup
/// 逻辑区段到物理区段查询
pub trait ExtentMap {
  /// Extent size of `vg` in sectors, 0 when the group does not exist
  /// `vg` 的区段大小（扇区），卷组不存在时为 0
  fn sectors_per_extent(&mut self, vg: &str) -> Result<u64>;

  fn logical_to_physical(&mut self, vg: &str, lv: &str, le: Le) -> Result<PvLoc>;

  /// Drop cached allocation so later lookups see current metadata
  /// 丢弃缓存的分配信息，使后续查询读取最新元数据
  fn refresh(&mut self) -> Result<()> {
    Ok(())
  }
}

impl<M: ExtentMap + ?Sized> ExtentMap for &mut M {
  #[inline]
  fn sectors_per_extent(&mut self, vg: &str) -> Result<u64> {
    (**self).sectors_per_extent(vg)
  }

  #[inline]
  fn logical_to_physical(&mut self, vg: &str, lv: &str, le: Le) -> Result<PvLoc> {
    (**self).logical_to_physical(vg, lv, le)
  }

  #[inline]
  fn refresh(&mut self) -> Result<()> {
    (**self).refresh()
  }
}

impl<M: ExtentMap + ?Sized> ExtentMap for Box<M> {
  #[inline]
  fn sectors_per_extent(&mut self, vg: &str) -> Result<u64> {
    (**self).sectors_per_extent(vg)
  }

  #[inline]
  fn logical_to_physical(&mut self, vg: &str, lv: &str, le: Le) -> Result<PvLoc> {
    (**self).logical_to_physical(vg, lv, le)
  }

  #[inline]
  fn refresh(&mut self) -> Result<()> {
    (**self).refresh()
  }
}
