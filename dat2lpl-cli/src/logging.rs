//! Log output for the command line.
//!
//! Info messages print bare; warnings, errors and debug messages get a
//! coloured prefix. Verbose mode lowers the level to debug and adds
//! timestamps. `RUST_LOG` overrides the level.

use std::io::Write;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                let ts = buf.timestamp();
                write!(buf, "[{ts}] ")?;
            }
            match record.level() {
                Level::Error => write!(buf, "{} ", "error:".if_supports_color(Stdout, |t| t.red()))?,
                Level::Warn => write!(
                    buf,
                    "{} ",
                    "warning:".if_supports_color(Stdout, |t| t.yellow())
                )?,
                Level::Debug | Level::Trace => {
                    write!(buf, "{} ", "debug:".if_supports_color(Stdout, |t| t.dimmed()))?
                }
                Level::Info => {}
            }
            writeln!(buf, "{}", record.args())
        });

    builder.init();
}
