pub mod generate;
pub mod translate;

use crate::config::{ConfigArgs, Settings};

/// Exit code for a run that failed or left models behind
pub const FAILURE_EXIT_CODE: i32 = 1;
/// Exit code for unusable flags or configuration
pub const CONFIG_ERROR_EXIT_CODE: i32 = 2;

pub async fn run_cli_async<F, Fut>(f: F) -> i32
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    match f().await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            FAILURE_EXIT_CODE
        }
    }
}

/// Resolve settings or report the problem with the config exit code.
pub fn resolve_or_exit(args: &ConfigArgs) -> Result<Settings, i32> {
    args.resolve().map_err(|err| {
        eprintln!("{err}");
        CONFIG_ERROR_EXIT_CODE
    })
}
