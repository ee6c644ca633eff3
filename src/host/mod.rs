//! Page implementations that do not need a browser.

mod memory;
mod terminal;

pub use memory::MemoryPage;
pub use terminal::TerminalPage;
