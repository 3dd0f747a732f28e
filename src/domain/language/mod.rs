pub mod language;

pub use language::{LanguageCode, LanguageGuard, FOREIGN_LANGUAGES, NATIVE_LANGUAGES};
