//! fuellog main entrypoint.

use fuellog::run;
use fuellog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
