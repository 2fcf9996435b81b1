pub mod assets;
pub mod document;
pub mod draft;
pub mod export;
pub mod field;
pub mod form;
pub mod render;
pub mod source_data;
pub mod template;
pub mod wizard;
