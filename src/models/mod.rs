pub mod inflation;
pub mod sale;
pub mod series;

pub use inflation::*;
pub use sale::*;
pub use series::*;
