//! Word validation: offline corpus, result cache and remote dictionary.

mod corpus;
mod error;
mod lookup;
mod validator;

pub use corpus::{Corpus, WordBank};
pub use error::LookupError;
pub use lookup::{DictionaryLookup, HttpDictionary};
pub use validator::{MIN_WORD_LEN, WordValidator};
