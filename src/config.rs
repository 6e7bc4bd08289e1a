use crate::{error::MazeError, generators::Generator};

/// Everything [`crate::generate`] needs to build a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeParams {
    pub height: usize,
    pub width: usize,
    pub generator: Generator,
    /// Seed for the maze RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Percent of the Rooms maximum to open, `0..=100`.
    pub rooms: u8,
    /// Percent of the Loops maximum to open, `0..=100`.
    pub loops: u8,
    /// Percent of non-endpoint cells to turn into obstacles, `0..=100`.
    pub obstacles: u8,
    /// Percent of the Islands maximum to close, `0..=100`.
    pub islands: u8,
}

impl Default for MazeParams {
    fn default() -> Self {
        Self {
            height: 20,
            width: 20,
            generator: Generator::RecurBacktrack(Default::default()),
            seed: None,
            rooms: 0,
            loops: 0,
            obstacles: 0,
            islands: 0,
        }
    }
}

impl MazeParams {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            ..Self::default()
        }
    }

    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rooms(mut self, percent: u8) -> Self {
        self.rooms = percent;
        self
    }

    pub fn with_loops(mut self, percent: u8) -> Self {
        self.loops = percent;
        self
    }

    pub fn with_obstacles(mut self, percent: u8) -> Self {
        self.obstacles = percent;
        self
    }

    pub fn with_islands(mut self, percent: u8) -> Self {
        self.islands = percent;
        self
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        if self.height == 0 || self.width == 0 {
            return Err(MazeError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        for (name, value) in [
            ("rooms", self.rooms),
            ("loops", self.loops),
            ("obstacles", self.obstacles),
            ("islands", self.islands),
        ] {
            check_percent(name, value)?;
        }
        Ok(())
    }
}

pub(crate) fn check_percent(name: &'static str, value: u8) -> Result<(), MazeError> {
    if value > 100 {
        Err(MazeError::InvalidPercentage { name, value })
    } else {
        Ok(())
    }
}
