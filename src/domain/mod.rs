mod company;
mod customer;
mod employee;
mod money;
mod period;
mod product;
mod schedule;
mod service_type;
mod summary;
mod transaction;

pub use company::*;
pub use customer::*;
pub use employee::*;
pub use money::*;
pub use period::*;
pub use product::*;
pub use schedule::*;
pub use service_type::*;
pub use summary::*;
pub use transaction::*;
