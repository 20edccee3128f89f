//! Selection state for batch delete mode

mod state;


pub use state::SelectionState;
