use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io::BufRead;

use crate::fasta::consts::FASTA_VALID_RESIDUE_BYTES;
use crate::fasta::FASTA_HEADER_PREFIX;
use crate::progress::ByteNum;
use crate::sequence::FastaSequence;

/// Error occurring during parsing a FASTA file.
#[derive(Debug)]
pub enum FastaReaderError {
    /// I/O error occurred when reading the FASTA file.
    IoError(std::io::Error),
    /// End-Of-File reached before any record data.
    EofReached,
    /// Not a valid FASTA file (record data before the first header).
    InvalidFormat,
    /// Invalid residue character.
    InvalidResidue(char),
}

impl From<std::io::Error> for FastaReaderError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl Display for FastaReaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FastaReaderError::IoError(e) => write!(f, "IO error: {}", e),
            FastaReaderError::EofReached => write!(f, "Reached the end of file"),
            FastaReaderError::InvalidFormat => write!(f, "Invalid format"),
            FastaReaderError::InvalidResidue(ch) => write!(f, "Invalid residue: `{}`", ch),
        }
    }
}

impl Error for FastaReaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FastaReaderError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

/// The result of a FASTA reading operation.
pub type FastaResult<T> = Result<T, FastaReaderError>;

/// FASTA format reader capable of deserializing the records into
/// [`FastaSequence`] objects.
#[derive(Debug)]
pub struct FastaReader<R> {
    reader: R,
    bytes_read: usize,
    buffer: Vec<u8>,
    // header line of the upcoming record, already consumed from the reader
    pending_header: Option<(String, usize)>,
}

impl<R: BufRead> FastaReader<R> {
    /// Creates new `FastaReader` instance.
    ///
    /// # Examples
    /// ```
    /// use hapcomp::fasta::reader::FastaReader;
    ///
    /// let buf = Vec::new();
    /// let _reader = FastaReader::new(buf.as_slice());
    /// ```
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            buffer: Vec::with_capacity(4096),
            pending_header: None,
        }
    }

    /// Reads a single FASTA record from given reader.
    pub fn read_sequence(&mut self) -> FastaResult<FastaSequence> {
        self.bytes_read = 0;
        let header = self.parse_header()?;
        let residues = self.parse_residues()?;

        let (identifier, description) = Self::split_header(&header);
        let seq = FastaSequence::with_size(
            identifier,
            description,
            residues,
            ByteNum::new(self.bytes_read),
        );
        Ok(seq)
    }

    /// Reads the header line of the next FASTA record.
    fn parse_header(&mut self) -> FastaResult<String> {
        if let Some((header, bytes)) = self.pending_header.take() {
            self.bytes_read += bytes;
            return Ok(header);
        }

        let line = loop {
            let line = Self::read_line(&mut self.reader, &mut self.buffer, &mut self.bytes_read)?;
            let line = String::from_utf8_lossy(line);

            if !line.trim().is_empty() {
                break line;
            }
        };

        if !line.starts_with(FASTA_HEADER_PREFIX) {
            return Err(FastaReaderError::InvalidFormat);
        }

        let header = line[1..].trim().to_owned();
        Ok(header)
    }

    /// Reads residue lines up to the next header line or the end of file.
    fn parse_residues(&mut self) -> FastaResult<Vec<u8>> {
        let mut residues = Vec::new();

        loop {
            let bytes_before = self.bytes_read;
            let line =
                match Self::read_line(&mut self.reader, &mut self.buffer, &mut self.bytes_read) {
                    Ok(line) => line,
                    Err(FastaReaderError::EofReached) => break,
                    Err(e) => return Err(e),
                };

            if line.first().copied() == Some(FASTA_HEADER_PREFIX as u8) {
                let header = String::from_utf8_lossy(line)[1..].trim().to_owned();
                let line_bytes = self.bytes_read - bytes_before;
                self.bytes_read = bytes_before;
                self.pending_header = Some((header, line_bytes));
                break;
            }

            for &ch in line {
                if FASTA_VALID_RESIDUE_BYTES[ch as usize] {
                    residues.push(ch);
                } else {
                    return Err(FastaReaderError::InvalidResidue(ch as char));
                }
            }
        }

        Ok(residues)
    }

    fn split_header(header: &str) -> (String, Option<String>) {
        match header.split_once(char::is_whitespace) {
            Some((identifier, description)) => {
                let description = description.trim();
                let description = if description.is_empty() {
                    None
                } else {
                    Some(description.to_owned())
                };
                (identifier.to_owned(), description)
            }
            None => (header.to_owned(), None),
        }
    }

    fn read_line<'a, T: BufRead>(
        mut buf_reader: T,
        buffer: &'a mut Vec<u8>,
        total_bytes_read: &mut usize,
    ) -> FastaResult<&'a [u8]> {
        buffer.clear();
        let bytes_read = buf_reader.read_until(b'\n', buffer)?;
        if bytes_read == 0 {
            return Err(FastaReaderError::EofReached);
        }
        *total_bytes_read += bytes_read;

        let mut buffer = buffer.as_slice();
        while matches!(buffer.last(), Some(b'\n') | Some(b'\r')) {
            buffer = &buffer[..buffer.len() - 1];
        }

        Ok(buffer)
    }
}

impl<R: BufRead> IntoIterator for FastaReader<R> {
    type Item = FastaResult<FastaSequence>;
    type IntoIter = FastaReaderIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            reader: self,
            no_errors: true,
        }
    }
}

/// Iterator implementation for [`FastaReader`] which iterates over all
/// records in a file.
#[derive(Debug)]
pub struct FastaReaderIterator<R> {
    reader: FastaReader<R>,
    no_errors: bool,
}

impl<R: BufRead> Iterator for FastaReaderIterator<R> {
    type Item = FastaResult<FastaSequence>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.no_errors {
            return None;
        }

        let result = self.reader.read_sequence();
        if result.is_err() {
            self.no_errors = false;
            if matches!(result, Err(FastaReaderError::EofReached)) {
                return None;
            }
        }
        Some(result)
    }
}
