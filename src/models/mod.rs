pub mod contact;
pub mod content;
pub mod discount;
pub mod order;
pub mod review;
pub mod shirt;
pub mod user;

pub use contact::*;
pub use content::*;
pub use discount::*;
pub use order::*;
pub use review::*;
pub use shirt::*;
pub use user::*;
