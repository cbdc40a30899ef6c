pub mod codes;
pub mod encounters;
pub mod health;
pub mod price;
