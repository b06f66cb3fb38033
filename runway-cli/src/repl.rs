use std::io::{BufRead, Write};

use crate::error::CliError;
use crate::session::{Outcome, Session};

const PROMPT: &str = "runway> ";
const BANNER: &str = "Flight Reservation System. Type `help` for commands, `quit` to leave.";

/// Feeds `input` line by line into `session` until EOF or `quit`.
///
/// A line that is not valid UTF-8 is answered with an error and skipped; the
/// session and its bookings survive.
pub fn run<R, W>(session: &mut Session, mut input: R, mut output: W, interactive: bool) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    if interactive {
        writeln!(output, "{BANNER}")?;
    }

    let mut buf = Vec::new();
    loop {
        if interactive {
            write!(output, "{PROMPT}")?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => match session.execute(line.trim_end_matches(['\r', '\n'])) {
                Outcome::Continue(reply) => reply,
                Outcome::Quit => break,
            },
            Err(_) => {
                tracing::debug!(bytes = buf.len(), "Skipping line with invalid UTF-8");
                CliError::Usage("Input line is not valid UTF-8".to_string()).render(session.json())
            }
        };

        if !reply.is_empty() {
            writeln!(output, "{reply}")?;
        }
    }

    output.flush()?;
    Ok(())
}
