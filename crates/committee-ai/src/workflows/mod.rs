pub mod apollo;
pub mod committee;
