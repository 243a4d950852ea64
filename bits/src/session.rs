//! The chunk loop shared by every input source.
use crate::input::Source;
use anyhow::Result;
use log::debug;
use numbits::{dump, print_top, Machine};


/// Exit status of a batch session that stopped at a fault.
pub const FAULT_STATUS: i32 = 1;

/// Runs every chunk `source` yields through `machine`.
///
/// Display output and the closing summary go to `out`; fault reports go to
/// `err`. Returns the exit status when a batch session stops at a fault,
/// `None` when input ran out normally.
pub fn run_session(
    source: &mut dyn Source,
    machine: &mut Machine,
    quiet: bool,
    out: &mut dyn FnMut(&str),
    err: &mut dyn FnMut(&str),
) -> Result<Option<i32>> {
    // Set when the last token run was a display command; the closing
    // printout would only repeat it.
    let mut shown = false;

    while let Some(chunk) = source.next_chunk()? {
        match machine.run(&chunk, out) {
            Ok(report) => {
                if report.executed > 0 {
                    shown = report.displayed;
                }
            }
            Err(fault) => {
                err(&format!("error: {}", fault));
                if !source.interactive() {
                    debug!("stopping at the first fault");
                    return Ok(Some(FAULT_STATUS));
                }
                shown = false;
            }
        }
    }

    if !quiet && !shown {
        let stack = machine.stack().as_slice();
        if stack.len() == 1 {
            out(&print_top(stack));
        } else {
            out(&dump(stack));
        }
    }
    Ok(None)
}
