//! Device path / 设备路径

use std::{fmt, path::PathBuf};

use crate::{Error, Result};

/// Volume group and logical volume named by a device path
/// 设备路径对应的卷组与逻辑卷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevPath {
  pub vg: String,
  pub lv: String,
}

impl DevPath {
  /// Last two segments of `/dev/<vg>/<lv>`, any leading directories are dropped
  /// 取 `/dev/<vg>/<lv>` 的最后两段，前导目录忽略
  pub fn parse(path: &str) -> Result<Self> {
    let bad = || Error::DevPath(path.into());
    let (head, lv) = path.rsplit_once('/').ok_or_else(bad)?;
    let vg = head.rsplit_once('/').map_or(head, |(_, vg)| vg);
    if vg.is_empty() || lv.is_empty() {
      return Err(bad());
    }
    Ok(Self {
      vg: vg.into(),
      lv: lv.into(),
    })
  }

  /// Block device node to trace
  /// 要跟踪的块设备节点
  #[inline]
  pub fn node(&self) -> PathBuf {
    PathBuf::from(format!("/dev/{self}"))
  }
}

impl fmt::Display for DevPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.vg, self.lv)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_dev() {
    let d = DevPath::parse("/dev/vg0/data").unwrap();
    assert_eq!((d.vg.as_str(), d.lv.as_str()), ("vg0", "data"));
    assert_eq!(d.node(), PathBuf::from("/dev/vg0/data"));
    assert_eq!(d.to_string(), "vg0/data");
  }

  #[test]
  fn parse_short() {
    let d = DevPath::parse("/vg0/data").unwrap();
    assert_eq!((d.vg.as_str(), d.lv.as_str()), ("vg0", "data"));
    let d = DevPath::parse("vg0/data").unwrap();
    assert_eq!(d.vg, "vg0");
  }

  #[test]
  fn parse_bad() {
    assert!(DevPath::parse("data").is_err());
    assert!(DevPath::parse("/data").is_err());
    assert!(DevPath::parse("/dev/vg0/").is_err());
    assert!(DevPath::parse("/dev//data").is_err());
    assert!(DevPath::parse("").is_err());
  }
}
