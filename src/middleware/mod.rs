pub mod catch_all;

pub use catch_all::CatchAll;
