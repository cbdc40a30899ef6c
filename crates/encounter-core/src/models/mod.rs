pub mod code;
pub mod modifier;
pub mod validity;
