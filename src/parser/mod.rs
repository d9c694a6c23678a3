//! CSV input reading with encoding and delimiter auto-detection.
//!
//! Rows come out keyed by header column name; downstream stages never
//! depend on column order. No trade-specific logic here.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed records, keyed by header column name
    pub records: Vec<HashMap<String, String>>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
    /// Column headers
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8(bytes.to_vec())
            .map_err(|e| CsvError::Encoding(e.to_string())),
        "iso-8859-1" | "latin-1" | "latin1" => {
            Ok(encoding_rs::ISO_8859_15.decode(bytes).0.to_string())
        }
        "windows-1252" | "cp1252" => Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()),
        _ => {
            // Fallback: UTF-8 with lossy conversion
            Ok(String::from_utf8_lossy(bytes).to_string())
        }
    }
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV text into header-keyed records with an explicit delimiter.
///
/// Quoting is handled per RFC 4180; malformed CSV yields
/// [`CsvError::Parse`].
///
/// # Example
/// ```ignore
/// use temple2bitwave::parse_records;
///
/// let csv = "trade_id,side\nT1,buy\nT2,sell";
/// let rows = parse_records(csv, ',').unwrap();
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0]["trade_id"], "T1");
/// assert_eq!(rows[1]["side"], "sell");
/// ```
pub fn parse_records(content: &str, delimiter: char) -> CsvResult<Vec<HashMap<String, String>>> {
    Ok(parse_string_with_metadata(content, delimiter, "utf-8".to_string())?.records)
}

/// Parse CSV file with auto-detection of encoding and delimiter.
pub fn parse_csv_file_auto<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes_auto(&bytes)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);

    parse_string_with_metadata(&content, delimiter, encoding)
}

/// Parse CSV text with explicit delimiter and return metadata.
pub fn parse_string_with_metadata(
    content: &str,
    delimiter: char,
    encoding: String,
) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row.map_err(|e| CsvError::Parse(e.to_string()))?;

        let mut obj = HashMap::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            obj.insert(header.clone(), row.get(i).unwrap_or("").to_string());
        }

        records.push(obj);
    }

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}
