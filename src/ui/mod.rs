//! Terminal expression explorer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, input editing, pane focus
//! - **[`panes`]** — stateless render functions for each visible pane (input,
//!   tokens, tree, printed form, diagnostics, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! Every edit of the input line reruns a fresh lex/parse cycle, so the panes
//! always show the current tokens, tree and diagnostics.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
