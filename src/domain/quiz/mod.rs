//! Quiz vocabulary: themes, questions, answers and the question catalog.

mod answer;
mod catalog;
mod question;
mod theme;

pub use answer::{Answer, Choice, Partner};
pub use catalog::{CatalogError, QuestionCatalog};
pub use question::{Question, Round};
pub use theme::{Theme, ThemeMap};
