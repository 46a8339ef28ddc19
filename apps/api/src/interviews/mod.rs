// Interview events scheduled against a company.

pub mod extract;
pub mod handlers;
pub mod input;
pub mod prompts;
pub mod repo;
