//! Domain types shared across Return Sync components.

mod cause;
mod ids;
mod inspection;
mod order;
mod queue;
mod request;
mod return_order;

pub use cause::*;
pub use ids::*;
pub use inspection::*;
pub use order::*;
pub use queue::*;
pub use request::*;
pub use return_order::*;
