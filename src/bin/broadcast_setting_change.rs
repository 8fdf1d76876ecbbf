//! Installer custom action: tells running applications that the
//! environment changed so new processes see the updated `PATH`.
//!
//! Always exits 0; a failed broadcast must never fail the installation.

use octobuild_installer::bundler::platform::windows::broadcast;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = broadcast::broadcast_setting_change();
    process::exit(result.exit_code());
}
