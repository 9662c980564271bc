//! GRL Editor - Core Library
//!
//! Editor model and submission pipeline shared by the TUI and the headless
//! `submit` command. Nothing in here touches the terminal.

pub mod config;
pub mod editor;
pub mod submit;

pub use config::{ConfigError, EditorConfig};
pub use editor::{
    scan, BlockPlacement, ContextBlock, ContextCollection, EditorSession, Highlighter, Interception,
    MatchSpan, Selection, StructuralKeyInterceptor, Tab, TabController, TextSurface,
};
pub use submit::{
    submit_once, EvaluationTransport, HttpTransport, SubmitError, SubmissionResult, Submitter,
    TransportError,
};
