use std::collections::HashMap;

/// Named constants visible to every evaluation. Read-only once built so a
/// single instance can be shared by all workers.
#[derive(Clone, Debug)]
pub struct Context {
    constants: HashMap<String, f64>,
}

impl Context {
    pub fn new() -> Self {
        use std::f64::consts;
        Self {
            constants: HashMap::new(),
        }
        .with("pi", consts::PI)
        .with("e", consts::E)
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
