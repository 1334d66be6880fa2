//! `check` command.

use anyhow::Result;
use manview_config::log;

use super::{Cli, common};

/// Validate the config file, printing every diagnostic.
///
/// Exits with status 1 when the file has any problem.
pub fn check_config(cli: &Cli) -> Result<()> {
    let (path, loaded) = common::load_config(cli);
    let Some(path) = path else {
        log!("check"; "no config file found, defaults are in effect");
        return Ok(());
    };

    match loaded.into_strict() {
        Ok(_) => {
            log!("check"; "`{}` is valid", path.display());
            Ok(())
        }
        Err(e) => {
            log!("error"; "`{}` has problems", path.display());
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
