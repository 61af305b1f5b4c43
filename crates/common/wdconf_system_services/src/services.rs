use std::fmt;

/// A service of the init system, named as in `system.toml` commands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SystemService<'a> {
    pub name: &'a str,
}

impl<'a> SystemService<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl fmt::Display for SystemService<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
