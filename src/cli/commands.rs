pub mod fetch;
pub mod forecast;
pub mod serve;

pub use fetch::fetch;
pub use forecast::forecast;
pub use serve::serve;
