pub mod month;
pub mod sector;
pub mod series;

pub use month::*;
pub use sector::*;
pub use series::*;
