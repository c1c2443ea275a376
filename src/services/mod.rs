pub mod analyze;
pub mod card;
pub mod digest;
pub mod join;
pub mod popularity;
pub mod providers;
