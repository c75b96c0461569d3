use std::io::ErrorKind;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;
use vice_render::Formatter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    pub lines: u64,
    pub bytes_out: u64,
}

/// Splits `input` into lines, formats each one and writes the blocks to
/// `output`.
///
/// Every newline-terminated line produces a block, empty ones included. A
/// trailing `\r` is dropped and invalid UTF-8 is replaced. A final line
/// without a terminator is formatted only when it is non-empty. Output is
/// flushed whenever no further input is buffered, so followed files show up
/// promptly. A closed output ends the stream without error.
pub async fn pump<R, W>(
    input: R,
    mut output: W,
    formatter: &Formatter,
) -> anyhow::Result<StreamStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut stats = StreamStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("read input")?;
        if read == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        let block = formatter.format_line(&line);

        let written = match output.write_all(block.as_bytes()).await {
            Ok(()) if reader.buffer().is_empty() => output.flush().await,
            other => other,
        };
        match written {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                debug!(lines = stats.lines, "output closed");
                return Ok(stats);
            }
            Err(e) => return Err(e).context("write output"),
        }

        stats.lines += 1;
        stats.bytes_out += block.len() as u64;
    }

    if let Err(e) = output.flush().await
        && e.kind() != ErrorKind::BrokenPipe
    {
        return Err(e).context("flush output");
    }
    Ok(stats)
}
