//! Transient notifications

/// Most toasts shown at once; older ones are dropped first
pub const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// Time (seconds) after which the toast disappears
    pub expires_at: f64,
}

#[derive(Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    lifetime: f64,
    next_id: u64,
}

impl Toasts {
    pub fn new(lifetime_secs: f32) -> Self {
        Self {
            items: Vec::new(),
            lifetime: lifetime_secs as f64,
            next_id: 0,
        }
    }

    pub fn push(&mut self, title: &str, description: &str, variant: ToastVariant, now: f64) {
        if variant == ToastVariant::Destructive {
            log::warn!("{}: {}", title, description);
        }
        self.items.push(Toast {
            id: self.next_id,
            title: title.to_string(),
            description: description.to_string(),
            variant,
            expires_at: now + self.lifetime,
        });
        self.next_id += 1;
        if self.items.len() > MAX_VISIBLE {
            let excess = self.items.len() - MAX_VISIBLE;
            self.items.drain(..excess);
        }
    }

    pub fn success(&mut self, description: &str, now: f64) {
        self.push("Success", description, ToastVariant::Default, now);
    }

    pub fn error(&mut self, description: &str, now: f64) {
        self.push("Error", description, ToastVariant::Destructive, now);
    }

    /// Drop toasts past their lifetime
    pub fn expire(&mut self, now: f64) {
        self.items.retain(|t| t.expires_at > now);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Visible toasts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut toasts = Toasts::new(4.0);
        toasts.success("Object created", 0.0);
        toasts.error("Object not found: x", 2.0);
        toasts.expire(4.5);
        let left: Vec<_> = toasts.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(left, vec!["Object not found: x"]);
        toasts.expire(6.0);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_capped_at_max_visible() {
        let mut toasts = Toasts::new(10.0);
        for i in 0..8 {
            toasts.success(&format!("toast {}", i), 0.0);
        }
        let shown: Vec<_> = toasts.iter().map(|t| t.description.clone()).collect();
        assert_eq!(shown.len(), MAX_VISIBLE);
        assert_eq!(shown[0], "toast 3");
    }

    #[test]
    fn test_dismiss() {
        let mut toasts = Toasts::new(10.0);
        toasts.success("a", 0.0);
        toasts.success("b", 0.0);
        let first = toasts.iter().next().unwrap().id;
        toasts.dismiss(first);
        assert_eq!(toasts.iter().count(), 1);
        assert_eq!(toasts.iter().next().unwrap().title, "Success");
    }
}
