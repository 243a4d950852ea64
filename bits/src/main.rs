#![forbid(unused_must_use)]
#![forbid(unsafe_code)]

use anyhow::Result;
use log::debug;
use numbits::Machine;
use options::Options;

mod config;
mod history;
mod input;
mod options;
mod session;

fn main() -> Result<()> {
    let options = Options::from_env();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        if options.verbose { "debug" } else { "warn" },
    ))
    .format_timestamp(None)
    .init();
    debug!("{:?}", options);

    let settings = config::load_settings(options.config.as_deref())?;
    let quiet = options.quiet || settings.quiet();
    let mut source = input::select_source(&options, &settings)?;

    let mut machine = Machine::new();
    let status = session::run_session(
        source.as_mut(),
        &mut machine,
        quiet,
        &mut |text| println!("{}", text),
        &mut |text| eprintln!("{}", text),
    )?;
    // Saves editor history before exiting.
    drop(source);

    if let Some(code) = status {
        std::process::exit(code);
    }
    Ok(())
}
