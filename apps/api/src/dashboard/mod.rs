// Dashboard and calendar views over the user's upcoming interviews.

pub mod grouping;
pub mod handlers;
