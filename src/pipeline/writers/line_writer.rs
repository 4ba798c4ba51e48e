use crate::error::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes serialized records to an output sink, one at a time.
pub struct LineWriter<W: AsyncWrite + Unpin> {
    sink: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    pub fn new(sink: W) -> Self {
        LineWriter { sink }
    }

    /// Write one record (newline included) and flush it through to the sink.
    /// The awaited flush is the backpressure gate: a slow consumer holds the
    /// whole pipeline here before the next record is pulled.
    pub async fn write_record(&mut self, record: &str) -> Result<()> {
        self.sink.write_all(record.as_bytes()).await?;
        self.sink.flush().await?;
        Ok(())
    }

    /// Finalize the sink once the stream is exhausted.
    pub async fn shutdown(mut self) -> Result<()> {
        self.sink.shutdown().await?;
        Ok(())
    }
}
