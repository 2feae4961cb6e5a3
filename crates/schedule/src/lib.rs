mod cache;
mod controller;
mod error;
mod http;
mod remote;
mod reporter;

pub use cache::*;
pub use controller::*;
pub use error::*;
pub use http::*;
pub use remote::*;
pub use reporter::*;
