// Smartmark UI-state components.
// Each component owns its own state and mutates it only through `&mut self`.

pub mod bookmark_synchronizer;
pub mod bookmark_writer;
pub mod session_gate;
