/// Publishers — where finished posts go.
use log::info;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("post rejected: {0}")]
    Rejected(String),
}

/// Accepts one fully rendered post at a time.
pub trait Publisher {
    fn publish(&mut self, text: &str) -> Result<(), PublishError>;
}

/// Collects posts in memory.
impl Publisher for Vec<String> {
    fn publish(&mut self, text: &str) -> Result<(), PublishError> {
        reject_empty(text)?;
        self.push(text.to_string());
        Ok(())
    }
}

/// Writes each post as a line to any `Write` sink.
#[derive(Debug)]
pub struct WriterPublisher<W: Write> {
    writer: W,
}

impl<W: Write> WriterPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterPublisher<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Publisher for WriterPublisher<W> {
    fn publish(&mut self, text: &str) -> Result<(), PublishError> {
        reject_empty(text)?;
        writeln!(self.writer, "{text}")?;
        self.writer.flush()?;
        info!("published {} characters", text.chars().count());
        Ok(())
    }
}

fn reject_empty(text: &str) -> Result<(), PublishError> {
    if text.trim().is_empty() {
        return Err(PublishError::Rejected("post is empty".to_string()));
    }
    Ok(())
}
