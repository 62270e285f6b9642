pub mod book;
pub mod layout;
pub mod reservations;
pub mod spots;
