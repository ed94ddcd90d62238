//! Common test utilities for CLI testing.

use assert_cmd::Command;
use notifeed_test_utils::SpecFixture;

/// Variables that would leak the developer's setup into a test run.
const ISOLATED_VARS: &[&str] = &[
    "RUST_LOG",
    "NOTIFEED_CONFIG",
    "NOTIFEED_INPUT_DIR",
    "NOTIFEED_OUTPUT_DIR",
    "NOTIFEED_OUTPUT_FILE",
    "NOTIFEED_ORDERING",
    "NOTIFEED_LOG_LEVEL",
    "NOTIFEED_LOG_FORMAT",
    "NOTIFEED_LOG_FILE",
];

/// A `notifeed` command running inside the fixture's project directory.
pub fn notifeed(project: &SpecFixture) -> Command {
    let mut cmd = Command::cargo_bin("notifeed").expect("Binary not found");
    cmd.current_dir(project.root()).env("NO_COLOR", "1");
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}
