use std::io::{BufRead, Write};

use crate::command::{dispatch, Response};
use crate::error::Error;
use crate::image::Raster;

/// Reads commands line by line and writes every response line to `output`.
/// At most one image is loaded at any time.
pub struct Session<R: BufRead, W: Write> {
    input: R,
    output: W,
    image: Option<Raster>,
    echo: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            image: None,
            echo: false,
        }
    }

    /// Writes each command back before its response, for scripted input.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    /// Runs until EXIT or the end of the input. The image is released in
    /// both cases.
    pub fn run(&mut self) -> crate::Result<()> {
        let mut commands_run = 0usize;
        while let Some(line) = self.next_line()? {
            commands_run += 1;
            if self.execute(&line)? {
                log::info!("Session ended by EXIT after {} commands", commands_run);
                return Ok(());
            }
        }
        log::info!("Input ended after {} commands", commands_run);
        self.image = None;
        Ok(())
    }

    /// Executes one command line and returns whether the session is over.
    pub fn execute(&mut self, line: &str) -> crate::Result<bool> {
        if self.echo {
            self.write_line(line)?;
        }
        let Response { lines, terminate } = dispatch(&mut self.image, line);
        for response_line in &lines {
            self.write_line(response_line)?;
        }
        self.output.flush().map_err(Error::FailedToWriteResponse)?;
        Ok(terminate)
    }

    fn next_line(&mut self) -> crate::Result<Option<String>> {
        let mut buffer = Vec::new();
        let bytes_read = self
            .input
            .read_until(b'\n', &mut buffer)
            .map_err(Error::FailedToReadCommand)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buffer);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
    }

    fn write_line(&mut self, line: &str) -> crate::Result<()> {
        writeln!(self.output, "{}", line).map_err(Error::FailedToWriteResponse)
    }
}
