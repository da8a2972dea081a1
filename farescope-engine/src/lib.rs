pub mod calendar;
pub mod filter;
pub mod transform;

pub use filter::{apply, FilterCriteria, SortOption, StopsFilter};
pub use transform::transform;
