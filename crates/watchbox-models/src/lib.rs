pub mod detail;
pub mod item;
pub mod kind;
pub mod year_range;

pub use detail::{ItemDetail, SourceRating};
pub use item::SearchResultItem;
pub use kind::{KindFilter, MediaKind};
pub use year_range::{YearRange, YearRangeError, DEFAULT_YEAR_MAX, DEFAULT_YEAR_MIN};
