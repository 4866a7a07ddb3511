/// Construction-time settings for a controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Fixed seed for the shuffle RNG. `None` seeds from the OS
    pub seed: Option<u64>,
}

impl ControllerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
