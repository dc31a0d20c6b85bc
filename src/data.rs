//! Controls how to extract and represent card data.

pub mod card;
pub mod source;
pub mod value;

pub use card::{Card, CardRecord, Skill};
pub use source::{DataSource, SourceType};
pub use value::Value;
