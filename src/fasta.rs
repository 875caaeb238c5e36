use anyhow::{bail, Result};
use flate2::read::GzDecoder;
use log::debug;
use noodles::bgzf;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A FASTA record: identifier plus concatenated, uppercased sequence.
/// The identifier is the first whitespace-delimited token after '>'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: String,
}

/// Detect bgzip by its gzip extra-field 'BC' subfield signature.
/// Plain gzip lacks the subfield and falls through to flate2.
fn is_bgzip(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 18];
    if file.read(&mut header).unwrap_or(0) < 18 {
        return Ok(false);
    }
    if header[0] != 0x1f || header[1] != 0x8b {
        return Ok(false);
    }
    if header[3] & 0x04 == 0 {
        return Ok(false);
    }
    Ok(header[12] == b'B' && header[13] == b'C')
}

/// Open a FASTA file and auto-detect bgzip/gzip compression, returning a
/// boxed BufRead
pub fn open_fasta_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();

    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz" || ext == "bgz")
        .unwrap_or(false);

    if is_compressed {
        let file = File::open(path)?;
        if is_bgzip(path)? {
            debug!("detected bgzip input: {}", path.display());
            Ok(Box::new(BufReader::new(bgzf::io::reader::Reader::new(
                file,
            ))))
        } else {
            debug!("detected gzip input: {}", path.display());
            Ok(Box::new(BufReader::new(GzDecoder::new(file))))
        }
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Streaming FASTA reader over any buffered input
pub struct FastaReader<R: BufRead> {
    reader: R,
    /// Header line consumed while reading the previous record's sequence
    pending: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            reader,
            pending: None,
        }
    }

    /// Read the next record, or `Ok(None)` at end of input.
    ///
    /// Sequence lines are trimmed, uppercased and concatenated until the
    /// next header or end of input. A header with no sequence lines yields
    /// an empty sequence, not an error. Sequence data before the first
    /// header is a fatal input-format error.
    pub fn read_record(&mut self) -> Result<Option<FastaRecord>> {
        let header = match self.pending.take() {
            Some(line) => line,
            None => {
                let mut found = None;
                loop {
                    let mut line = String::new();
                    if self.reader.read_line(&mut line)? == 0 {
                        break;
                    }
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !line.starts_with('>') {
                        bail!("sequence data before first FASTA header: {line:?}");
                    }
                    found = Some(line.to_string());
                    break;
                }
                match found {
                    Some(line) => line,
                    None => return Ok(None),
                }
            }
        };

        let id = header[1..]
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();

        let mut seq = String::new();
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('>') {
                self.pending = Some(line.to_string());
                break;
            }
            seq.push_str(&line.to_ascii_uppercase());
        }

        Ok(Some(FastaRecord { id, seq }))
    }

    pub fn read_all(&mut self) -> Result<Vec<FastaRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }
}
