use maud::{html, Markup};

pub mod error;
pub mod format;

pub use error::html_error_response;
pub use format::{money, percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Info => "notice notice-info",
            NoticeKind::Warning => "notice notice-warning",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

pub fn notice(kind: NoticeKind, message: &str) -> Markup {
    html! {
        div class=(kind.class()) role="status" { (message) }
    }
}
