pub mod comparator;
pub mod format;

pub use comparator::Comparator;
pub use format::FormatValidator;
