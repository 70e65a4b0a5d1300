pub mod builder;
pub mod placeholder;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use builder::CollectionBuilder;
pub use placeholder::{CollectionVariable, placeholders};
pub use types::{
    Body, Collection, Event, Folder, Header, Info, Method, QueryParam, Request, RequestItem,
    RequestUrl, Script, Variable,
};
pub use writer::CollectionWriter;
