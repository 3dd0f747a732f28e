use super::delimiter::{split_pair, DelimiterSet, Detection};
use super::error::ParseError;
use super::model::{ForeignOnlyPhrase, ParsedFile, PhrasePair};

/// Parses the content of one uploaded phrase file.
///
/// The delimiter is detected on the first non-blank line and then required on
/// every line. When the first line has no usable delimiter the whole file is
/// read as foreign-only phrases, one per line.
pub fn parse_file(raw: &str, delimiters: &DelimiterSet) -> Result<ParsedFile, ParseError> {
    let lines: Vec<(usize, &str)> = raw
        .trim_start_matches('\u{feff}')
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let Some(&(first_number, first_line)) = lines.first() else {
        return Err(ParseError::EmptyFile);
    };

    let delimiter = match delimiters.detect(first_line) {
        Detection::Ambiguous => {
            return Err(ParseError::AmbiguousDelimiter {
                line_number: first_number,
                line: first_line.to_string(),
                first_line: true,
            })
        }
        Detection::NotFound => {
            let phrases = lines
                .into_iter()
                .map(|(_, line)| ForeignOnlyPhrase::new(line))
                .collect();
            return Ok(ParsedFile::ForeignOnly { phrases });
        }
        Detection::Found(delimiter) => delimiter,
    };

    let mut pairs = Vec::with_capacity(lines.len());
    for (line_number, line) in lines {
        match delimiters.detect(line) {
            Detection::Ambiguous => {
                return Err(ParseError::AmbiguousDelimiter {
                    line_number,
                    line: line.to_string(),
                    first_line: false,
                })
            }
            Detection::Found(other) if other != delimiter => {
                return Err(ParseError::MalformedLine {
                    line_number,
                    line: line.to_string(),
                })
            }
            _ => {}
        }

        let (native, foreign) =
            split_pair(line, delimiter).ok_or_else(|| ParseError::MalformedLine {
                line_number,
                line: line.to_string(),
            })?;
        pairs.push(PhrasePair { native, foreign });
    }

    Ok(ParsedFile::Bilingual { delimiter, pairs })
}
