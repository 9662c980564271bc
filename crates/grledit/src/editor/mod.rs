//! In-memory editor model.
//!
//! Every editing surface is an explicit [`TextSurface`]; the TUI renders from
//! these buffers and feeds key events back into them.

pub mod blocks;
pub mod highlight;
pub mod interceptor;
pub mod session;
pub mod surface;
pub mod tabs;

pub use blocks::{BlockPlacement, ContextBlock, ContextCollection};
pub use highlight::{scan, Highlighter, Keyword, MatchSpan};
pub use interceptor::{Interception, StructuralKeyInterceptor};
pub use session::{EditorSession, Focus};
pub use surface::{Selection, TextSurface};
pub use tabs::{Tab, TabController};
