//! Mapper errors / 映射错误

use hipstr::HipStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("IO: {0}")]
  Io(#[from] std::io::Error),

  #[error("no volume group named {0} / 卷组不存在")]
  VgNotFound(HipStr<'static>),

  #[error("no logical volume {vg}/{lv} / 逻辑卷不存在")]
  LvNotFound {
    vg: HipStr<'static>,
    lv: HipStr<'static>,
  },

  #[error("extent {le} of {lv} is not allocated")]
  NoSegment { lv: HipStr<'static>, le: u64 },

  #[error("parse {what}: {line:?}")]
  Parse { what: &'static str, line: String },
}

pub type Result<T> = std::result::Result<T, Error>;
