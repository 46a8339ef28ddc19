pub mod company;
pub mod interview;
pub mod prep;
pub mod profile;
pub mod user;
