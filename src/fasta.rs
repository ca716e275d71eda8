use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub desc: String,
    pub seq: String,
}

impl FastaRecord {
    pub fn new(id: String, desc: String, seq: String) -> Self {
        Self { id, desc, seq }
    }
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    // header line already consumed while scanning the previous record
    pending: Option<String>,
}

impl FastaReader<Box<dyn BufRead>> {
    /// Opens `path` for reading, `-` meaning stdin and `.gz` meaning
    /// gzip-compressed input.
    pub fn from_path(path: &str) -> io::Result<Self> {
        let reader: Box<dyn BufRead> = if path == "-" {
            Box::new(BufReader::new(io::stdin()))
        } else {
            let f = File::open(path)?;
            if path.ends_with(".gz") {
                Box::new(BufReader::new(MultiGzDecoder::new(f)))
            } else {
                Box::new(BufReader::new(f))
            }
        };
        Ok(FastaReader::new(reader))
    }
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    pub fn next_record(&mut self) -> io::Result<Option<FastaRecord>> {
        let header = match self.pending.take() {
            Some(h) => Some(h),
            None => loop {
                match self.read_line()? {
                    None => break None,
                    Some(l) if l.starts_with('>') => break Some(l),
                    Some(_) => continue,
                }
            },
        };
        let header = match header {
            Some(h) => h,
            None => return Ok(None),
        };

        let body = header[1..].trim_start();
        let (id, desc) = match body.split_once(char::is_whitespace) {
            Some((id, desc)) => (id.to_string(), desc.trim_start().to_string()),
            None => (body.to_string(), String::new()),
        };

        let mut seq = String::new();
        loop {
            match self.read_line()? {
                None => break,
                Some(l) if l.starts_with('>') => {
                    self.pending = Some(l);
                    break;
                }
                Some(l) => seq.push_str(l.trim()),
            }
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = io::Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

pub struct FastaWriter {
    writer: Box<dyn Write>,
}

impl FastaWriter {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    /// Opens `path` for writing, `-` meaning stdout and `.gz` meaning
    /// gzip-compressed output.
    pub fn to_path(path: &str) -> io::Result<Self> {
        let writer: Box<dyn Write> = if path == "-" {
            Box::new(BufWriter::new(io::stdout()))
        } else {
            let f = File::create(path)?;
            if path.ends_with(".gz") {
                Box::new(GzEncoder::new(f, Compression::default()))
            } else {
                Box::new(BufWriter::new(f))
            }
        };
        Ok(FastaWriter::new(writer))
    }

    pub fn write_record(&mut self, rec: &FastaRecord) -> io::Result<()> {
        if rec.desc.is_empty() {
            writeln!(self.writer, ">{}", rec.id)?;
        } else {
            writeln!(self.writer, ">{} {}", rec.id, rec.desc)?;
        }
        writeln!(self.writer, "{}", rec.seq)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str) -> Vec<FastaRecord> {
        FastaReader::new(input.as_bytes())
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn parses_single_record() {
        let records = read_all(">seq1 some description\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].desc, "some description");
        assert_eq!(records[0].seq, "ACGT");
    }

    #[test]
    fn joins_multi_line_sequences() {
        let records = read_all(">seq1\nACGT\nTTTT\nGG\n>seq2\nAAAA\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seq, "ACGTTTTTGG");
        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].seq, "AAAA");
    }

    #[test]
    fn header_without_description() {
        let records = read_all(">seq1\nACGT\n");
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].desc, "");
    }

    #[test]
    fn skips_leading_junk_and_blank_lines() {
        let records = read_all("; comment\n\n>seq1\nAC\n\nGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, "ACGT");
    }

    #[test]
    fn handles_crlf_endings() {
        let records = read_all(">seq1 desc\r\nACGT\r\nTT\r\n");
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].desc, "desc");
        assert_eq!(records[0].seq, "ACGTTT");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(read_all("").is_empty());
    }

    #[test]
    fn writer_drops_empty_description() {
        use std::sync::{Arc, Mutex};

        struct SharedVecWriter(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedVecWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().write(buf)
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buf = Arc::new(Mutex::new(Vec::new()));
        let mut writer = FastaWriter::new(Box::new(SharedVecWriter(buf.clone())));
        writer
            .write_record(&FastaRecord::new("id1".into(), String::new(), "ACGT".into()))
            .unwrap();
        writer
            .write_record(&FastaRecord::new("id2".into(), "desc".into(), "TT".into()))
            .unwrap();
        writer.flush().unwrap();

        let written = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert_eq!(written, ">id1\nACGT\n>id2 desc\nTT\n");
    }
}
