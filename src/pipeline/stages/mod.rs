pub mod filter;
pub mod parse;
pub mod project;
pub mod serialize;

pub use filter::SubstringFilter;
pub use parse::ParseStage;
pub use project::ProjectField;
pub use serialize::SerializeStage;
