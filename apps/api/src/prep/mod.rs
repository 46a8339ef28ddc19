// Interview preparation notes, one set per company, and their AI rating.

pub mod handlers;
pub mod input;
pub mod prompts;
pub mod rating;
pub mod repo;
