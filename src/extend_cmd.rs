//! Extend command: grow stored days out to the edges of the expected range.

use anyhow::Result;
use tracing::info_span;

use crate::cli::ExtendArgs;
use crate::generate::{self, Session};

/// Run an extension session.
pub fn run(args: ExtendArgs) -> Result<()> {
    let _cmd = info_span!("extend").entered();
    let report = generate::execute(&args.calendar, Session::Extend { past: args.past })?;
    print!("{report}");
    Ok(())
}
