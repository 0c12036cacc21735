//! Configuration / 配置

use lvmts_base::{DEFAULT_TOP, INIT_EXTENTS, REPORT_EVERY, SLACK};

use crate::DevPath;

/// Run configuration, built once at startup
/// 运行配置，启动时构建一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
  /// Volume group / 卷组
  pub vg: String,
  /// Logical volume / 逻辑卷
  pub lv: String,
  /// Extents printed per ranking / 每个排名输出的区段数
  pub top: usize,
  /// Initial extent table size / 区段表初始大小
  pub init_extents: usize,
  /// Growth slack / 扩容余量
  pub slack: usize,
  /// Stream seconds between reports / 两次报告之间的流时间（秒）
  pub report_every: u64,
  /// Print per-extent scores at end of stream / 流结束时输出各区段分数
  pub dump: bool,
}

impl Conf {
  pub fn new(dev: DevPath) -> Self {
    Self {
      vg: dev.vg,
      lv: dev.lv,
      ..Self::default()
    }
  }
}

impl Default for Conf {
  fn default() -> Self {
    Self {
      vg: String::new(),
      lv: String::new(),
      top: DEFAULT_TOP,
      init_extents: INIT_EXTENTS,
      slack: SLACK,
      report_every: REPORT_EVERY,
      dump: true,
    }
  }
}
