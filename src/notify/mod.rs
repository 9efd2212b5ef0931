//! User-facing toast notifications. Delivery is fire-and-forget.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub dismiss_label: String,
}

pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// In-memory notifier that keeps every toast in order.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Vec<Toast>,
}

impl ToastLog {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn messages(&self, level: ToastLevel) -> Vec<&str> {
        self.toasts
            .iter()
            .filter(|toast| toast.level == level)
            .map(|toast| toast.message.as_str())
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.messages(ToastLevel::Success)
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages(ToastLevel::Error)
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

impl Notifier for ToastLog {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}
