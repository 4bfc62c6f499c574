use rand::Rng;

/// How many stars the backdrop seeds, matching the original night-sky look.
pub const STAR_COUNT: usize = 60;

/// Runtime ticks for one full twinkle cycle.
const TWINKLE_PERIOD: u64 = 40;

/// One background star with its own twinkle offset so the field never
/// blinks in unison.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub x: u16,
    pub y: u16,
    pub phase: u64,
}

/// Decorative animated night sky rendered behind every screen.
#[derive(Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    width: u16,
    height: u16,
    tick: u64,
}

impl Starfield {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            width: 0,
            height: 0,
            tick: 0,
        }
    }

    /// Reseeds star positions when the terminal size changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.stars.clear();

        if width == 0 || height == 0 {
            return;
        }

        let mut rng = rand::thread_rng();
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
                phase: rng.gen_range(0..TWINKLE_PERIOD),
            })
            .collect();
    }

    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn is_bright(&self, star: &Star) -> bool {
        (self.tick + star.phase) % TWINKLE_PERIOD < TWINKLE_PERIOD / 2
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}
