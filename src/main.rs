mod entry;
mod logger;
mod shutdown_handlers;

use loadgen::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
