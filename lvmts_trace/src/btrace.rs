//! btrace child process
//! btrace 子进程

use std::{
  io::BufReader,
  path::Path,
  process::{Child, ChildStdout, Command, Stdio},
};

use log::{info, warn};

use crate::{Error, LineSource, Record, RecordSource, Result};

/// Tracer binary
/// 跟踪工具
pub const BTRACE: &str = "btrace";

/// Live completion records from a spawned tracer, child is reaped on drop
/// 来自子进程跟踪工具的实时完成事件，Drop 时回收子进程
pub struct Btrace {
  child: Child,
  src: LineSource<BufReader<ChildStdout>>,
  done: bool,
}

impl Btrace {
  /// `btrace -t -a complete <dev>`
  pub fn spawn(dev: &Path) -> Result<Self> {
    let mut cmd = Command::new(BTRACE);
    cmd.args(["-t", "-a", "complete"]).arg(dev);
    Self::from_cmd(cmd)
  }

  /// Spawn `cmd` with piped stdout and read records from it
  /// 以管道 stdout 启动 `cmd` 并从中读取记录
  pub fn from_cmd(mut cmd: Command) -> Result<Self> {
    let name = format!("{cmd:?}");
    let mut child = cmd
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .spawn()
      .map_err(|source| Error::Spawn {
        cmd: name.clone(),
        source,
      })?;
    let Some(out) = child.stdout.take() else {
      let _ = child.kill();
      let _ = child.wait();
      return Err(Error::Spawn {
        cmd: name,
        source: std::io::Error::other("stdout not captured"),
      });
    };
    info!("trace source started: {name}");
    Ok(Self {
      child,
      src: LineSource::new(BufReader::new(out)),
      done: false,
    })
  }
}

impl RecordSource for Btrace {
  fn next_record(&mut self) -> Result<Option<Record>> {
    if self.done {
      return Ok(None);
    }
    let r = self.src.next_record()?;
    if r.is_none() {
      self.done = true;
      match self.child.wait() {
        Ok(status) if status.success() => info!("trace source exited"),
        Ok(status) => warn!("trace source exited: {status}"),
        Err(e) => warn!("trace source wait: {e}"),
      }
    }
    Ok(r)
  }

  #[inline]
  fn skipped(&self) -> u64 {
    self.src.skipped()
  }
}

impl Drop for Btrace {
  fn drop(&mut self) {
    if !self.done {
      let _ = self.child.kill();
      let _ = self.child.wait();
    }
  }
}
