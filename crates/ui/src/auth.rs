use std::sync::Arc;

/// Decides whether the admin console is visible. The answer is fixed for
/// the lifetime of the process; there is no login flow.
pub trait AuthGate: Send + Sync {
    fn is_admin(&self) -> bool;
}

/// Gate with a precomputed answer. The desktop binary builds one from its
/// environment; tests build one directly.
pub struct StaticAuthGate {
    is_admin: bool,
}

impl StaticAuthGate {
    #[must_use]
    pub fn new(is_admin: bool) -> Arc<Self> {
        Arc::new(Self { is_admin })
    }
}

impl AuthGate for StaticAuthGate {
    fn is_admin(&self) -> bool {
        self.is_admin
    }
}
