//! Errors / 错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("IO: {0}")]
  Io(#[from] std::io::Error),

  #[error("specify path as /dev/<vg-name>/<lv-name>, got {0:?}")]
  DevPath(String),

  #[error("No volume group named {0}")]
  VgNotFound(String),

  #[error(transparent)]
  Heat(#[from] lvmts_heat::Error),

  #[error(transparent)]
  Trace(#[from] lvmts_trace::Error),

  #[error(transparent)]
  Map(#[from] lvmts_map::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
