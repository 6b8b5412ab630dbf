//! Rule-based intent dispatch.
//!
//! [`IntentDispatcher`] classifies each input with the priority-ordered rules in
//! [`intent`], picks or computes a reply, and records both messages in the
//! [`SessionStore`](chatai_core::session::SessionStore) it owns.

pub mod arithmetic;
pub mod dispatcher;
pub mod intent;
pub mod picker;

pub use arithmetic::CalcError;
pub use dispatcher::{IntentDispatcher, ProcessOutcome};
pub use intent::{Intent, classify};
pub use picker::{ReplyPicker, RngPicker};
