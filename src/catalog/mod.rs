pub mod graph;
pub mod purposes;

pub use graph::{current_lesson, is_unlocked, progress, Applicability, Catalog, LessonCatalogItem, Progress};
pub use purposes::{PurposeFlavor, PurposeTable};
