use crate::error::{PipelineError, Result};
use async_compression::tokio::bufread::GzipDecoder;
use futures::StreamExt;
use std::io::ErrorKind;
use tokio::io::{AsyncRead, BufReader};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Upper bound on a single framed record unless the configuration says
/// otherwise. Keeps the framing buffer bounded on hostile input.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 1024 * 1024;

/// Turns a gzip-compressed byte stream into newline-delimited records.
///
/// Chunk boundaries never align with record boundaries; the codec buffers the
/// incomplete tail until the next chunk arrives. At end-of-stream a non-empty
/// unterminated tail is emitted as a final record, so a truncated last line
/// surfaces downstream as a parse failure instead of disappearing silently.
pub struct GzipLineReader<R: AsyncRead + Unpin> {
    frames: FramedRead<GzipDecoder<BufReader<R>>, LinesCodec>,
    max_record_bytes: usize,
}

impl<R: AsyncRead + Unpin> GzipLineReader<R> {
    pub fn new(input: R, max_record_bytes: usize) -> Self {
        let decoder = GzipDecoder::new(BufReader::new(input));
        let frames = FramedRead::new(decoder, LinesCodec::new_with_max_length(max_record_bytes));
        GzipLineReader {
            frames,
            max_record_bytes,
        }
    }

    /// The next decompressed record, in input order.
    ///
    /// Returns `None` once the stream is exhausted. Corrupt or truncated gzip
    /// data terminates the stream with `DecompressionError`; the reader must
    /// not be reused afterwards.
    pub async fn next_record(&mut self) -> Option<Result<String>> {
        match self.frames.next().await? {
            Ok(line) => Some(Ok(line)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Some(Err(PipelineError::RecordTooLarge {
                limit: self.max_record_bytes,
            })),
            // The gzip decoder reports bad headers, checksum mismatches and
            // truncated members through the io error channel.
            Err(LinesCodecError::Io(e))
                if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::UnexpectedEof) =>
            {
                Some(Err(PipelineError::DecompressionError(e.to_string())))
            }
            Err(LinesCodecError::Io(e)) => Some(Err(PipelineError::IoError { source: e })),
        }
    }
}
