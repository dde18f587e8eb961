use std::io::{BufRead, BufReader, BufWriter, Write};

/// Opens `input` for buffered reading. `stdin` reads standard input and a
/// `.gz` extension is decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = cgr::reader("tests/bed/regions.bed").unwrap();
/// let lines = reader.lines().collect::<Vec<_>>();
/// assert_eq!(lines.len(), 4);
///
/// assert!(cgr::reader("tests/bed/missing.bed").is_err());
/// ```
pub fn reader(input: &str) -> std::io::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = std::path::Path::new(input);
        let file = std::fs::File::open(path).map_err(|why| {
            std::io::Error::new(
                why.kind(),
                format!("could not open {}: {}", path.display(), why),
            )
        })?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens `output` for buffered writing; `stdout` writes to the screen.
pub fn writer(output: &str) -> std::io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        Box::new(BufWriter::new(std::fs::File::create(output)?))
    };

    Ok(writer)
}

/// Reads all lines of `input` into memory.
pub fn read_lines(input: &str) -> std::io::Result<Vec<String>> {
    reader(input)?.lines().collect()
}
