//! shiftkeeper main entrypoint.

use shiftkeeper::run;
use shiftkeeper::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
