//! Tilepaint - command-line tile map editor and assembly exporter

use std::process::ExitCode;

use tilepaint::cli;

fn main() -> ExitCode {
    cli::run()
}
