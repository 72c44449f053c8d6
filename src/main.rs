//! Renders the core-count comparison charts from `csv/<cores>error.csv` into
//! the working directory. Settings come from `Charts.toml` when it exists.

extern crate chrono;
extern crate corechart;
extern crate env_logger;
#[macro_use]
extern crate log;

use corechart::Setting;
use std::io::Write;
use std::process;

pub fn main() {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format(|buf, record| {
        let t = chrono::Local::now();
        writeln!(
            buf,
            "{} {:<5} {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });
    builder.init();

    let result = Setting::discover().and_then(|setting| {
        debug!("{:?}", setting);
        corechart::run(&setting)
    });

    if let Err(e) = result {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        process::exit(1);
    }
}
