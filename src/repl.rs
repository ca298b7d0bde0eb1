//! Line-reading loops around the interpreter.
//!
//! [`run`] drives an interactive `rustyline` editor with in-memory history.
//! [`run_script`] reads commands from any buffered reader, which is what the
//! binary uses when stdin is not a terminal.

use crate::interpreter::{Flow, Interpreter};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};
use tokio::runtime::Runtime;

pub const PROMPT: &str = "> ";

/// Runs the interactive loop until an exit token, Ctrl-D, or a read error.
///
/// Ctrl-C discards the current line and keeps the session going.
pub fn run(interpreter: &mut Interpreter, runtime: &Runtime) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let stdout = io::stdout();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                let flow = runtime.block_on(interpreter.eval_line(&line));
                if !show(flow, &mut stdout.lock())? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                log::error!("failed to read input: {}", err);
                return Err(err);
            }
        }
    }

    Ok(())
}

/// Evaluates every line of `input` in order, writing output to `out`.
///
/// Stops early at an exit token.
pub fn run_script<R: BufRead, W: Write>(
    input: R,
    interpreter: &mut Interpreter,
    runtime: &Runtime,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let flow = runtime.block_on(interpreter.eval_line(&line));
        if !show(flow, out)? {
            break;
        }
    }
    Ok(())
}

/// Writes a line's output. Returns `false` once the session should end.
fn show<W: Write>(flow: Flow, out: &mut W) -> io::Result<bool> {
    match flow {
        Flow::Continue(output) => {
            if !output.is_empty() {
                writeln!(out, "{}", output)?;
            }
            out.flush()?;
            Ok(true)
        }
        Flow::Exit => Ok(false),
    }
}
