//! lvmtsd - print the hottest physical extents of a logical volume
//! 输出逻辑卷中最热的物理区段

use std::{
  fs::File,
  io::{self, BufReader, BufWriter, Write},
  path::PathBuf,
  process::ExitCode,
};

use clap::Parser;
use lvmts_base::{DEFAULT_TOP, now_sec};
use lvmts_map::LvmMap;
use lvmts_trace::{Btrace, LineSource, RecordSource};
use lvmtsd::{Conf, DevPath, Ingest, Result};

#[derive(Debug, Parser)]
#[command(name = "lvmtsd", version, about = "Rank hot LVM extents from live block traces")]
struct Cli {
  /// Logical volume device, /dev/<vg-name>/<lv-name>
  dev: String,

  /// Number of extents to print per ranking
  #[arg(default_value_t = DEFAULT_TOP)]
  top: usize,

  /// Read blkparse text from a file ("-" for stdin) instead of running btrace
  #[arg(long, value_name = "PATH")]
  input: Option<PathBuf>,

  /// Don't print per-extent scores at end of stream
  #[arg(long)]
  no_dump: bool,
}

fn source(cli: &Cli, dev: &DevPath) -> Result<Box<dyn RecordSource>> {
  Ok(match &cli.input {
    Some(p) if p.to_str() == Some("-") => Box::new(LineSource::new(io::stdin().lock())),
    Some(p) => Box::new(LineSource::new(BufReader::new(File::open(p)?))),
    None => Box::new(Btrace::spawn(&dev.node())?),
  })
}

fn run(cli: Cli) -> Result<()> {
  let dev = DevPath::parse(&cli.dev)?;
  let conf = Conf {
    top: cli.top,
    dump: !cli.no_dump,
    ..Conf::new(dev.clone())
  };

  // Session is released on drop, on every return path
  // 会话在 Drop 时释放，覆盖所有返回路径
  let map = LvmMap::open(&conf.vg)?;
  let start = now_sec();
  let mut ingest = Ingest::new(&conf, map, start)?;

  let src = source(&cli, &dev)?;
  let mut out = BufWriter::new(io::stdout().lock());
  ingest.run(src, &mut out)?;
  ingest.finish(&mut out)?;
  out.flush()?;
  Ok(())
}

fn main() -> ExitCode {
  log_init::init();

  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(e) => {
      let _ = e.print();
      return if e.use_stderr() {
        ExitCode::FAILURE
      } else {
        ExitCode::SUCCESS
      };
    }
  };

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("{e}");
      ExitCode::FAILURE
    }
  }
}
