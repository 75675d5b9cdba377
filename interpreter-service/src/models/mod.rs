pub mod article;

pub use article::{Article, InterpretResponse};
