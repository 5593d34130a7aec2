pub mod color;
pub mod export;
pub mod health;
pub mod session;
pub mod validation;
