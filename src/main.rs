//! cadetroster main entrypoint.

use cadetroster::run;
use cadetroster::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
