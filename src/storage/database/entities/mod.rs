/// Caretaker entity module
pub mod caretaker;
/// Family entity module
pub mod family;

pub use caretaker::Entity as Caretaker;
pub use family::Entity as Family;
