use std::io;

use crate::session::Session;
use crate::Result;

/// Run the menu session against the process console.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
