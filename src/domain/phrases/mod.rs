pub mod delimiter;
pub mod dto;
pub mod error;
pub mod model;
pub mod parser;
pub mod service;

pub use delimiter::{Delimiter, DelimiterSet, Detection};
pub use dto::{
    ExportRequest, FileReport, FileStatus, PhraseBatch, PhraseBatchRequest, UploadedFile,
};
pub use error::{ParseError, PhraseServiceError};
pub use model::{FileFormat, ForeignOnlyPhrase, ParsedFile, PhrasePair};
pub use parser::parse_file;
pub use service::{export_file_name, pairs_digest, PhraseService, PhraseServiceApi};
