// Companies: the user's job applications and everything hanging off them.

pub mod extract;
pub mod handlers;
pub mod input;
pub mod prompts;
pub mod repo;
pub mod uploads;
